//! Skin and attachment synchronization.
//!
//! After every physics step the bell's renderable skin is re-derived from
//! the simulated rim: the convex hull of all center/rim vertices becomes
//! the skin polygon, and each tentacle root is steered toward its evenly
//! spaced slot on the line between the two rim far ends. All intermediate
//! buffers are reused across ticks.

use glam::Vec2;

use crate::creature::assembly::Assembly;
use crate::creature::params::CreatureTuning;
use crate::geometry::{self, interpolate};
use crate::simulation::PhysicsWorld;

/// Per-creature skin state and scratch buffers.
pub struct SkinSync {
    points: Vec<Vec2>,
    scratch: Vec<Vec2>,
    hull: Vec<Vec2>,
    local: Vec<Vec2>,
    centroid: Vec2,
    hull_valid: bool,
    first_attach: bool,
}

impl SkinSync {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            scratch: Vec::new(),
            hull: Vec::new(),
            local: Vec::new(),
            centroid: Vec2::ZERO,
            hull_valid: false,
            first_attach: true,
        }
    }

    /// World-space hull from the last successful resync.
    pub fn hull(&self) -> &[Vec2] {
        &self.hull
    }

    /// Hull polygon relative to its centroid (the skin shape's local verts).
    pub fn local_polygon(&self) -> &[Vec2] {
        &self.local
    }

    pub fn centroid(&self) -> Vec2 {
        self.centroid
    }

    /// Whether a valid hull is available for drawing and hover testing.
    pub fn hull_valid(&self) -> bool {
        self.hull_valid
    }

    /// Recompute the skin hull from the current bell vertices.
    ///
    /// Returns `true` when the hull was rebuilt; a degenerate vertex cloud
    /// (fewer than 3 distinct points) invalidates the hull and returns
    /// `false` so the caller skips the redraw this tick.
    pub fn resync_skin<W: PhysicsWorld>(&mut self, world: &W, assembly: &Assembly) -> bool {
        self.points.clear();
        for segment in assembly.bell_segments() {
            let found = world.vertices_into(assembly.body(segment), &mut self.points);
            assert!(found, "bell segment body missing from physics world");
        }

        if !geometry::convex_hull_into(&self.points, &mut self.scratch, &mut self.hull) {
            log::debug!("degenerate bell hull ({} points), skipping skin redraw", self.points.len());
            self.hull_valid = false;
            return false;
        }

        self.centroid = geometry::centroid(&self.hull);
        self.local.clear();
        self.local.extend(self.hull.iter().map(|v| *v - self.centroid));
        self.hull_valid = true;
        true
    }

    /// Re-target tentacle roots onto the rim far-end axis.
    ///
    /// The very first call hard-snaps each whole chain onto its slot; every
    /// later call nudges only the root's velocity by a fraction of the
    /// offset, so roots follow the rim without teleporting.
    pub fn sync_attachments<W: PhysicsWorld>(
        &mut self,
        world: &mut W,
        assembly: &Assembly,
        tuning: &CreatureTuning,
    ) {
        let (far_left, far_right) = assembly.rim_far_ends();
        let left = world
            .position(assembly.body(far_left))
            .expect("rim far-end body missing from physics world");
        let right = world
            .position(assembly.body(far_right))
            .expect("rim far-end body missing from physics world");
        let axis = right - left;

        let count = assembly.tentacle_count();
        let first = std::mem::take(&mut self.first_attach);
        for (i, chain) in assembly.tentacles.iter().enumerate() {
            let anchor = left + axis * interpolate::even_fraction(i, count);
            let root = assembly.body(chain[0]);
            let root_pos = world
                .position(root)
                .expect("tentacle root body missing from physics world");
            let offset = anchor - root_pos;
            if first {
                for segment in chain {
                    world.translate(assembly.body(*segment), offset);
                }
            } else {
                world.set_velocity(root, offset * tuning.attachment_gain);
            }
        }
    }
}

impl Default for SkinSync {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::builder;
    use crate::creature::params::JellyfishParams;
    use crate::rng::seeded_rng;
    use crate::simulation::{EngineConfig, PhysicsWorld, SoftBodyEngine};

    fn built() -> (SoftBodyEngine, Assembly) {
        let mut world = SoftBodyEngine::new(EngineConfig::default());
        let mut rng = seeded_rng(5);
        let params = JellyfishParams {
            center: Vec2::new(400.0, 500.0),
            width: 150.0,
            tentacle_len: 300.0,
            color: [1.0, 0.05, 0.53],
        };
        let built = builder::build(&params, &CreatureTuning::default(), &mut rng, &mut world)
            .expect("build should succeed");
        (world, built.assembly)
    }

    #[test]
    fn hull_has_at_least_three_points_and_bounded_centroid() {
        let (world, assembly) = built();
        let mut skin = SkinSync::new();
        assert!(skin.resync_skin(&world, &assembly));
        assert!(skin.hull().len() >= 3);

        let mut min = Vec2::splat(f32::MAX);
        let mut max = Vec2::splat(f32::MIN);
        for &body in assembly.all_bodies() {
            let p = world.position(body).unwrap();
            min = min.min(p);
            max = max.max(p);
        }
        let c = skin.centroid();
        assert!(
            c.x >= min.x && c.x <= max.x && c.y >= min.y && c.y <= max.y,
            "centroid {:?} outside creature bounds {:?}..{:?}",
            c,
            min,
            max
        );
    }

    #[test]
    fn first_attachment_snaps_roots_onto_the_rim_axis() {
        let (mut world, assembly) = built();
        let mut skin = SkinSync::new();
        skin.sync_attachments(&mut world, &assembly, &CreatureTuning::default());

        let (far_left, far_right) = assembly.rim_far_ends();
        let left = world.position(assembly.body(far_left)).unwrap();
        let right = world.position(assembly.body(far_right)).unwrap();
        let axis = right - left;
        let count = assembly.tentacle_count();
        for (i, chain) in assembly.tentacles.iter().enumerate() {
            let anchor = left + axis * interpolate::even_fraction(i, count);
            let root = world.position(assembly.body(chain[0])).unwrap();
            assert!(
                (root - anchor).length() < 1e-3,
                "tentacle {} root {:?} should sit at {:?}",
                i,
                root,
                anchor
            );
            assert!(
                world.velocity(assembly.body(chain[0])).unwrap().length() < 1e-6,
                "hard snap must not impart velocity"
            );
        }
    }

    #[test]
    fn later_attachment_passes_converge_root_velocity() {
        let (mut world, assembly) = built();
        let tuning = CreatureTuning::default();
        let mut skin = SkinSync::new();
        skin.sync_attachments(&mut world, &assembly, &tuning); // snap

        // Displace one root, then resync repeatedly with a frozen rim:
        // the commanded velocity must not grow between passes.
        let root = assembly.body(assembly.tentacles[0][0]);
        world.translate(root, Vec2::new(12.0, -7.0));

        skin.sync_attachments(&mut world, &assembly, &tuning);
        let v1 = world.velocity(root).unwrap().length();
        skin.sync_attachments(&mut world, &assembly, &tuning);
        let v2 = world.velocity(root).unwrap().length();
        assert!(v1 > 0.0, "offset root should receive a velocity nudge");
        assert!(v2 <= v1 + 1e-6, "repeated resync must not diverge: {} then {}", v1, v2);
    }
}
