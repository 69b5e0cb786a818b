//! The jellyfish creature facade.
//!
//! Ties the builder, locomotion, skin synchronization, and hover layers
//! together behind the host-facing lifecycle: build → attach → update per
//! fixed step → destroy. The creature owns its bodies, constraints, and
//! shapes exclusively; destroying it deregisters everything.

use glam::Vec2;
use rand::Rng;

use crate::creature::assembly::Assembly;
use crate::creature::params::{BuildError, CreatureTuning, JellyfishParams};
use crate::creature::skin::SkinSync;
use crate::creature::{behavior, builder};
use crate::geometry;
use crate::input::{HoverState, HoverTransition};
use crate::scene::{Color, SceneRenderer, ShapeDef, ShapeId};
use crate::simulation::{BodyId, PhysicsWorld};

type HoverCallback = Box<dyn FnMut()>;

/// A procedurally assembled, mouse-reactive jellyfish.
pub struct Jellyfish {
    assembly: Assembly,
    tuning: CreatureTuning,
    skin: SkinSync,
    skin_shape: Option<ShapeId>,
    hover: HoverState,
    clock_ms: f32,
    phase_offset_ms: f32,
    behavior_running: bool,
    target: Option<Vec2>,
    on_enter: Option<HoverCallback>,
    on_leave: Option<HoverCallback>,
}

impl Jellyfish {
    /// Build the creature's body/constraint graph in `world`.
    ///
    /// Randomized counts and the swim phase offset are drawn from `rng`;
    /// a fixed seed reproduces the topology exactly.
    pub fn build<W, R>(
        params: JellyfishParams,
        tuning: CreatureTuning,
        rng: &mut R,
        world: &mut W,
    ) -> Result<Self, BuildError>
    where
        W: PhysicsWorld,
        R: Rng,
    {
        let built = builder::build(&params, &tuning, rng, world)?;
        let mut skin = SkinSync::new();
        skin.resync_skin(world, &built.assembly);
        // Hard positional snap: chains start stacked at the bell center
        skin.sync_attachments(world, &built.assembly, &tuning);

        let hover = HoverState::new(
            tuning.head_opacity,
            tuning.hover_opacity,
            tuning.opacity_ease_ms,
            params.color,
            tuning.color_ease_ms,
        );

        Ok(Self {
            assembly: built.assembly,
            tuning,
            skin,
            skin_shape: None,
            hover,
            clock_ms: 0.0,
            phase_offset_ms: built.phase_offset_ms,
            behavior_running: true,
            target: None,
            on_enter: None,
            on_leave: None,
        })
    }

    /// Create the creature's shapes in `scene`: one per tentacle/arm
    /// segment plus the bell skin polygon.
    pub fn attach<S: SceneRenderer>(&mut self, scene: &mut S) {
        let color = self.current_color();
        self.assembly.create_shapes(scene, color);
        if self.skin_shape.is_none() {
            self.skin_shape = Some(scene.create_shape(ShapeDef {
                vertices: self.skin.local_polygon().to_vec(),
                color,
                opacity: self.tuning.head_opacity,
                visible: true,
            }));
        }
    }

    /// Advance the creature by one fixed step, after the world integrated.
    ///
    /// Order per tick: skin/attachment resync, locomotion forces, hover and
    /// easing, then transform projection onto the scene shapes.
    pub fn update<W, S>(&mut self, world: &mut W, scene: &mut S, dt_ms: f32)
    where
        W: PhysicsWorld,
        S: SceneRenderer,
    {
        self.clock_ms += dt_ms;

        let redrawn = self.skin.resync_skin(world, &self.assembly);
        self.skin.sync_attachments(world, &self.assembly, &self.tuning);

        if self.behavior_running {
            behavior::apply(
                world,
                &self.assembly,
                &self.tuning,
                self.clock_ms + self.phase_offset_ms,
                self.target,
            );
        }

        self.update_hover();
        let restyle_segments = !self.hover.color_settled();
        let (opacity, color) = self.hover.advance(dt_ms);

        if let Some(skin_shape) = self.skin_shape {
            if redrawn {
                scene.set_polygon(skin_shape, self.skin.local_polygon());
                scene.set_transform(skin_shape, self.skin.centroid(), 0.0);
            }
            scene.set_style(skin_shape, color, opacity);
        }
        if restyle_segments {
            self.assembly.restyle(scene, color);
        }
        self.assembly.project(world, scene);
    }

    fn update_hover(&mut self) {
        // No pointer yet: leave the hover state untouched this tick
        let Some(pointer) = self.target else { return };
        if !self.skin.hull_valid() {
            return;
        }
        let inside = geometry::contains(self.skin.hull(), pointer);
        match self.hover.set_inside(inside) {
            Some(HoverTransition::Entered) => {
                if let Some(cb) = self.on_enter.as_mut() {
                    cb();
                }
            }
            Some(HoverTransition::Left) => {
                if let Some(cb) = self.on_leave.as_mut() {
                    cb();
                }
            }
            None => {}
        }
    }

    /// Pointer position used for both steering and hover testing.
    pub fn set_target(&mut self, target: Option<Vec2>) {
        self.target = target;
    }

    /// Stop applying locomotion forces. Idempotent; the behavior clock
    /// keeps running, so resuming re-enters the current cycle phase.
    pub fn suspend_behavior(&mut self) {
        self.behavior_running = false;
    }

    pub fn resume_behavior(&mut self) {
        self.behavior_running = true;
    }

    pub fn behavior_running(&self) -> bool {
        self.behavior_running
    }

    /// Ease the creature's fill color toward a new value.
    pub fn retint(&mut self, color: Color) {
        self.hover.retint(color);
    }

    /// Register a callback fired once per hover entry.
    pub fn on_hover_enter(&mut self, callback: impl FnMut() + 'static) {
        self.on_enter = Some(Box::new(callback));
    }

    /// Register a callback fired once per hover exit.
    pub fn on_hover_leave(&mut self, callback: impl FnMut() + 'static) {
        self.on_leave = Some(Box::new(callback));
    }

    pub fn is_hovered(&self) -> bool {
        self.hover.is_hovered()
    }

    /// Current skin hull in world space (hover region and bell outline).
    pub fn skin_hull(&self) -> &[Vec2] {
        self.skin.hull()
    }

    /// Whether `point` lies inside the bell skin.
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.skin.hull_valid() && geometry::contains(self.skin.hull(), point)
    }

    /// The bell center's body handle.
    pub fn bell_center_body(&self) -> BodyId {
        self.assembly.body(self.assembly.head())
    }

    pub fn tentacle_count(&self) -> usize {
        self.assembly.tentacle_count()
    }

    pub fn arm_count(&self) -> usize {
        self.assembly.arm_count()
    }

    fn current_color(&self) -> Color {
        self.hover.current().1
    }

    /// Deregister every body, constraint, and shape this creature owns.
    pub fn destroy<W, S>(mut self, world: &mut W, scene: &mut S)
    where
        W: PhysicsWorld,
        S: SceneRenderer,
    {
        for &constraint in self.assembly.constraints() {
            world.remove_constraint(constraint);
        }
        for &body in self.assembly.all_bodies() {
            world.remove_body(body);
        }
        self.assembly.remove_shapes(scene);
        if let Some(skin_shape) = self.skin_shape.take() {
            scene.remove_shape(skin_shape);
        }
        log::debug!("destroyed jellyfish ({} segments)", self.assembly.segment_count());
    }
}
