//! Physics world seam.
//!
//! The creature core never touches a concrete engine's internals; it drives
//! whatever implements [`PhysicsWorld`]. The built-in
//! [`SoftBodyEngine`](crate::simulation::SoftBodyEngine) implements it for
//! headless simulation and tests; hosts may adapt any 2D rigid-body engine
//! with soft distance constraints.

use glam::Vec2;

/// Handle to a rigid body owned by a physics world.
///
/// Handles stay valid until the body is removed; queries on a removed body
/// return `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub u32);

/// Handle to a constraint owned by a physics world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstraintId(pub u32);

/// Collision category bits. Segments never resolve contacts in this crate;
/// the tags mask which bodies accept the pointer probe.
pub mod category {
    /// The external pointer probe
    pub const MOUSE_PROBE: u16 = 1 << 0;
    /// Bell center segment
    pub const BELL_CENTER: u16 = 1 << 1;
    /// Bell rim trapezoids
    pub const BELL_RIM: u16 = 1 << 2;
    /// Feeding arm circles
    pub const ARM: u16 = 1 << 4;
    /// Tentacle rectangles
    pub const TENTACLE: u16 = 1 << 5;
}

/// Category/mask pair for a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionFilter {
    pub category: u16,
    pub mask: u16,
}

impl CollisionFilter {
    pub const fn new(category: u16, mask: u16) -> Self {
        Self { category, mask }
    }

    /// Whether two filters may interact (both masks accept the other side).
    pub fn interacts_with(&self, other: &CollisionFilter) -> bool {
        self.mask & other.category != 0 && other.mask & self.category != 0
    }
}

/// Bulk material properties of a body.
#[derive(Debug, Clone, Copy)]
pub struct Material {
    /// Mass per unit polygon area
    pub density: f32,
    /// Per-step velocity loss fraction at the reference step length
    pub friction_air: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            density: 0.001,
            friction_air: 0.01,
        }
    }
}

/// Everything needed to register one rigid body.
#[derive(Debug, Clone)]
pub struct BodyDef {
    /// Local polygon, centered on the body origin
    pub shape: Vec<Vec2>,
    /// Initial world position of the body origin
    pub position: Vec2,
    pub material: Material,
    pub filter: CollisionFilter,
}

/// A spring-like link between two attachment points on two bodies.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintDef {
    pub body_a: BodyId,
    pub body_b: BodyId,
    /// Attachment point in body A local space
    pub point_a: Vec2,
    /// Attachment point in body B local space
    pub point_b: Vec2,
    /// Correction fraction per pass, (0, 1]
    pub stiffness: f32,
    /// Relative-velocity loss along the constraint axis, [0, 1]
    pub damping: f32,
    /// Rest length between the two attachment points
    pub rest_length: f32,
}

/// Narrow interface over a 2D rigid-body engine.
///
/// Query methods return `None` once a body has been removed, which callers
/// owning the body treat as a lifecycle violation.
pub trait PhysicsWorld {
    fn create_body(&mut self, def: BodyDef) -> BodyId;
    fn create_constraint(&mut self, def: ConstraintDef) -> ConstraintId;
    fn remove_body(&mut self, id: BodyId);
    fn remove_constraint(&mut self, id: ConstraintId);

    /// Accumulate a force (and the induced torque) at a world-space point.
    fn apply_force(&mut self, id: BodyId, world_point: Vec2, force: Vec2);
    /// Overwrite the body's velocity (distance per step).
    fn set_velocity(&mut self, id: BodyId, velocity: Vec2);
    /// Overwrite the body's mass, rescaling its inertia.
    fn set_mass(&mut self, id: BodyId, mass: f32);
    /// Move a body without imparting velocity.
    fn translate(&mut self, id: BodyId, delta: Vec2);

    fn position(&self, id: BodyId) -> Option<Vec2>;
    fn angle(&self, id: BodyId) -> Option<f32>;
    fn velocity(&self, id: BodyId) -> Option<Vec2>;
    fn mass(&self, id: BodyId) -> Option<f32>;

    /// Append the body's current world-space vertices to `out`.
    ///
    /// Returns `false` (leaving `out` untouched) for a removed body.
    fn vertices_into(&self, id: BodyId, out: &mut Vec<Vec2>) -> bool;

    /// Advance the world by one fixed step.
    fn step(&mut self, dt_ms: f32);
}
