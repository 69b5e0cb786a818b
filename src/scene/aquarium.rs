//! Fixed-step driver owning the world, the scene, and the creatures.
//!
//! The host feeds real frame deltas; the aquarium accumulates them and
//! drains whole fixed steps, so the locomotion state machine and the skin
//! synchronizer always observe evenly spaced simulation time regardless of
//! frame rate. Creatures are updated in sequence within each step and own
//! disjoint body/constraint sets.

use glam::Vec2;

use crate::creature::Jellyfish;
use crate::scene::traits::SceneRenderer;
use crate::simulation::PhysicsWorld;

/// Default fixed step: 60 Hz in milliseconds.
pub const FIXED_STEP_MS: f32 = 1000.0 / 60.0;

/// Container driving any number of jellyfish over one physics world and
/// one scene.
pub struct Aquarium<W: PhysicsWorld, S: SceneRenderer> {
    world: W,
    scene: S,
    jellyfish: Vec<Jellyfish>,
    step_ms: f32,
    accumulator_ms: f32,
    steps_taken: u64,
    pointer: Option<Vec2>,
}

impl<W: PhysicsWorld, S: SceneRenderer> Aquarium<W, S> {
    pub fn new(world: W, scene: S) -> Self {
        Self {
            world,
            scene,
            jellyfish: Vec::new(),
            step_ms: FIXED_STEP_MS,
            accumulator_ms: 0.0,
            steps_taken: 0,
            pointer: None,
        }
    }

    /// Add a creature and attach its shapes to the scene.
    pub fn add_jellyfish(&mut self, mut jellyfish: Jellyfish) -> usize {
        jellyfish.attach(&mut self.scene);
        self.jellyfish.push(jellyfish);
        log::info!("aquarium now holds {} jellyfish", self.jellyfish.len());
        self.jellyfish.len() - 1
    }

    /// Advance by a real frame delta, draining whole fixed steps.
    pub fn tick(&mut self, delta_ms: f32) {
        if !(delta_ms > 0.0) {
            return;
        }
        self.accumulator_ms += delta_ms;
        while self.accumulator_ms >= self.step_ms {
            self.world.step(self.step_ms);
            for jellyfish in self.jellyfish.iter_mut() {
                jellyfish.set_target(self.pointer);
                jellyfish.update(&mut self.world, &mut self.scene, self.step_ms);
            }
            self.accumulator_ms -= self.step_ms;
            self.steps_taken += 1;
        }
    }

    /// Current pointer position in world space, or `None` off-canvas.
    pub fn set_pointer(&mut self, pointer: Option<Vec2>) {
        self.pointer = pointer;
    }

    /// Pointer pressed: a grabbed creature stops swimming while dragged.
    pub fn pointer_down(&mut self) {
        let Some(pointer) = self.pointer else { return };
        for jellyfish in self.jellyfish.iter_mut() {
            if jellyfish.contains_point(pointer) {
                jellyfish.suspend_behavior();
            }
        }
    }

    /// Pointer released: every creature resumes mid-cycle.
    pub fn pointer_up(&mut self) {
        for jellyfish in self.jellyfish.iter_mut() {
            jellyfish.resume_behavior();
        }
    }

    pub fn jellyfish(&self) -> &[Jellyfish] {
        &self.jellyfish
    }

    pub fn jellyfish_mut(&mut self, index: usize) -> Option<&mut Jellyfish> {
        self.jellyfish.get_mut(index)
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Fixed steps drained since creation.
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Destroy every creature, deregistering all bodies and shapes.
    pub fn clear(&mut self) {
        for jellyfish in self.jellyfish.drain(..) {
            jellyfish.destroy(&mut self.world, &mut self.scene);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::{CreatureTuning, JellyfishParams};
    use crate::rng::seeded_rng;
    use crate::scene::NullRenderer;
    use crate::simulation::{EngineConfig, SoftBodyEngine};

    fn test_aquarium(seed: u64) -> Aquarium<SoftBodyEngine, NullRenderer> {
        let mut world = SoftBodyEngine::new(EngineConfig::default());
        let mut rng = seeded_rng(seed);
        let jellyfish = Jellyfish::build(
            JellyfishParams {
                center: Vec2::new(400.0, 500.0),
                width: 150.0,
                tentacle_len: 300.0,
                color: [1.0, 0.05, 0.53],
            },
            CreatureTuning::default(),
            &mut rng,
            &mut world,
        )
        .expect("build should succeed");

        let mut aquarium = Aquarium::new(world, NullRenderer::new());
        aquarium.add_jellyfish(jellyfish);
        aquarium
    }

    #[test]
    fn tick_drains_whole_fixed_steps_only() {
        let mut aquarium = test_aquarium(1);
        aquarium.tick(10.0);
        assert_eq!(aquarium.steps_taken(), 0, "10ms is less than one step");
        aquarium.tick(10.0);
        assert_eq!(aquarium.steps_taken(), 1, "20ms accumulates to one step");
        aquarium.tick(100.0);
        assert_eq!(aquarium.steps_taken(), 7, "remainder carries across ticks");
    }

    #[test]
    fn uneven_frame_deltas_produce_even_simulation_time() {
        let mut a = test_aquarium(2);
        let mut b = test_aquarium(2);
        a.tick(1000.0);
        for _ in 0..40 {
            b.tick(25.0);
        }
        let diff = a.steps_taken().abs_diff(b.steps_taken());
        assert!(diff <= 1, "step counts drifted: {} vs {}", a.steps_taken(), b.steps_taken());
    }

    #[test]
    fn grabbing_a_creature_suspends_it_until_release() {
        let mut aquarium = test_aquarium(3);
        aquarium.tick(aquarium.step_ms);

        let centroid = crate::geometry::centroid(aquarium.jellyfish()[0].skin_hull());
        aquarium.set_pointer(Some(centroid));
        aquarium.pointer_down();
        assert!(!aquarium.jellyfish()[0].behavior_running());

        aquarium.pointer_up();
        assert!(aquarium.jellyfish()[0].behavior_running());
    }

    #[test]
    fn pointer_outside_every_hull_grabs_nothing() {
        let mut aquarium = test_aquarium(4);
        aquarium.tick(aquarium.step_ms);
        aquarium.set_pointer(Some(Vec2::new(-9_999.0, -9_999.0)));
        aquarium.pointer_down();
        assert!(aquarium.jellyfish()[0].behavior_running());
    }

    #[test]
    fn clear_destroys_all_creatures() {
        let mut aquarium = test_aquarium(5);
        assert!(aquarium.world().body_count() > 0);
        aquarium.clear();
        assert!(aquarium.jellyfish().is_empty());
        assert_eq!(aquarium.world().body_count(), 0);
        assert_eq!(aquarium.scene().shape_count(), 0);
    }

    #[test]
    fn one_simulated_second_stays_finite() {
        let mut aquarium = test_aquarium(6);
        aquarium.tick(1000.0);
        let jellyfish = &aquarium.jellyfish()[0];
        let position = aquarium
            .world()
            .position(jellyfish.bell_center_body())
            .expect("bell center should exist");
        assert!(position.is_finite());
        assert!(jellyfish.skin_hull().len() >= 3);
    }
}
