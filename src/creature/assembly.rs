//! Assembled creature state — arena-style parallel arrays.
//!
//! Every segment gets a stable [`SegmentId`] index into parallel arrays
//! (body handle, role, local polygon, render state). The per-tick
//! projection walks a precomputed list of projected segments instead of
//! rebuilding any shape-to-body mapping.

use glam::Vec2;

use crate::scene::{SceneRenderer, ShapeDef, ShapeId};
use crate::simulation::{BodyId, ConstraintId};

/// Stable index of a segment within one creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentId(pub u32);

/// Structural role of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentRole {
    BellCenter,
    Rim,
    Tentacle,
    Arm,
}

/// The creature's body/constraint graph plus render bookkeeping.
///
/// Rim and center segments are never projected to shapes; they exist to
/// drive the derived skin hull. Tentacle and arm segments each own one
/// shape once the creature is attached to a scene.
pub struct Assembly {
    // Parallel arrays indexed by SegmentId
    bodies: Vec<BodyId>,
    roles: Vec<SegmentRole>,
    local_shapes: Vec<Vec<Vec2>>,
    opacities: Vec<f32>,
    visibles: Vec<bool>,
    shapes: Vec<Option<ShapeId>>,

    /// Segments copied to shapes every tick, in creation order
    projected: Vec<SegmentId>,

    pub(crate) head: SegmentId,
    /// Left rim chain, outermost segment first
    pub(crate) rim_left: Vec<SegmentId>,
    /// Right rim chain, innermost segment first
    pub(crate) rim_right: Vec<SegmentId>,
    /// Tentacle chains, root segment first
    pub(crate) tentacles: Vec<Vec<SegmentId>>,
    /// Arm chains, root segment first
    pub(crate) arms: Vec<Vec<SegmentId>>,

    constraints: Vec<ConstraintId>,
}

impl Assembly {
    pub(crate) fn new(head_body: BodyId, head_shape: Vec<Vec2>) -> Self {
        let mut assembly = Self {
            bodies: Vec::new(),
            roles: Vec::new(),
            local_shapes: Vec::new(),
            opacities: Vec::new(),
            visibles: Vec::new(),
            shapes: Vec::new(),
            projected: Vec::new(),
            head: SegmentId(0),
            rim_left: Vec::new(),
            rim_right: Vec::new(),
            tentacles: Vec::new(),
            arms: Vec::new(),
            constraints: Vec::new(),
        };
        assembly.head =
            assembly.push_segment(SegmentRole::BellCenter, head_body, head_shape, 1.0, false);
        assembly
    }

    pub(crate) fn push_segment(
        &mut self,
        role: SegmentRole,
        body: BodyId,
        local_shape: Vec<Vec2>,
        opacity: f32,
        visible: bool,
    ) -> SegmentId {
        let id = SegmentId(self.bodies.len() as u32);
        self.bodies.push(body);
        self.roles.push(role);
        self.local_shapes.push(local_shape);
        self.opacities.push(opacity);
        self.visibles.push(visible);
        self.shapes.push(None);
        if matches!(role, SegmentRole::Tentacle | SegmentRole::Arm) {
            self.projected.push(id);
        }
        id
    }

    pub(crate) fn push_constraint(&mut self, id: ConstraintId) {
        self.constraints.push(id);
    }

    pub fn body(&self, id: SegmentId) -> BodyId {
        self.bodies[id.0 as usize]
    }

    pub fn role(&self, id: SegmentId) -> SegmentRole {
        self.roles[id.0 as usize]
    }

    pub fn segment_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn head(&self) -> SegmentId {
        self.head
    }

    /// The two rim far-end segments (left, right).
    pub fn rim_far_ends(&self) -> (SegmentId, SegmentId) {
        (
            *self.rim_left.first().expect("rim chains are never empty"),
            *self.rim_right.last().expect("rim chains are never empty"),
        )
    }

    /// Center + rim segments, the vertex sources for the skin hull.
    pub(crate) fn bell_segments(&self) -> impl Iterator<Item = SegmentId> + '_ {
        std::iter::once(self.head)
            .chain(self.rim_left.iter().copied())
            .chain(self.rim_right.iter().copied())
    }

    pub fn tentacle_count(&self) -> usize {
        self.tentacles.len()
    }

    pub fn arm_count(&self) -> usize {
        self.arms.len()
    }

    pub fn tentacle_len(&self, index: usize) -> usize {
        self.tentacles[index].len()
    }

    pub fn arm_len(&self, index: usize) -> usize {
        self.arms[index].len()
    }

    pub(crate) fn constraints(&self) -> &[ConstraintId] {
        &self.constraints
    }

    pub(crate) fn all_bodies(&self) -> &[BodyId] {
        &self.bodies
    }

    /// Create one scene shape per projected segment, using the fill color
    /// shared by the whole creature.
    pub(crate) fn create_shapes(&mut self, scene: &mut impl SceneRenderer, color: [f32; 3]) {
        for &seg in &self.projected {
            let i = seg.0 as usize;
            if self.shapes[i].is_some() {
                continue;
            }
            let id = scene.create_shape(ShapeDef {
                vertices: self.local_shapes[i].clone(),
                color,
                opacity: self.opacities[i],
                visible: self.visibles[i],
            });
            self.shapes[i] = Some(id);
        }
    }

    /// Copy each projected body's transform onto its shape.
    pub(crate) fn project<W, S>(&self, world: &W, scene: &mut S)
    where
        W: crate::simulation::PhysicsWorld,
        S: SceneRenderer,
    {
        for &seg in &self.projected {
            let i = seg.0 as usize;
            let Some(shape) = self.shapes[i] else { continue };
            let body = self.bodies[i];
            let position = world
                .position(body)
                .expect("projected body missing from physics world");
            let rotation = world
                .angle(body)
                .expect("projected body missing from physics world");
            scene.set_transform(shape, position, rotation);
        }
    }

    /// Restyle every projected shape (retint path).
    pub(crate) fn restyle(&self, scene: &mut impl SceneRenderer, color: [f32; 3]) {
        for &seg in &self.projected {
            let i = seg.0 as usize;
            if let Some(shape) = self.shapes[i] {
                scene.set_style(shape, color, self.opacities[i]);
            }
        }
    }

    /// Remove every shape this assembly created.
    pub(crate) fn remove_shapes(&mut self, scene: &mut impl SceneRenderer) {
        for slot in self.shapes.iter_mut() {
            if let Some(id) = slot.take() {
                scene.remove_shape(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projected_list_holds_only_tentacles_and_arms() {
        let mut assembly = Assembly::new(BodyId(0), vec![Vec2::ZERO, Vec2::X, Vec2::Y]);
        let rim = assembly.push_segment(SegmentRole::Rim, BodyId(1), vec![], 0.85, false);
        let tentacle = assembly.push_segment(SegmentRole::Tentacle, BodyId(2), vec![], 0.7, true);
        let arm = assembly.push_segment(SegmentRole::Arm, BodyId(3), vec![], 0.75, true);

        assert_eq!(assembly.segment_count(), 4);
        assert_eq!(assembly.role(rim), SegmentRole::Rim);
        assert_eq!(assembly.projected, vec![tentacle, arm]);
        assert_eq!(assembly.body(tentacle), BodyId(2));
    }
}
