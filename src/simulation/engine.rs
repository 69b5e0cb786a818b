//! Built-in deterministic CPU engine.
//!
//! A small position-based rigid-body integrator: Verlet positions with
//! implicit velocity, per-step air friction, and iterative relaxation of
//! soft distance constraints with inverse-mass/inertia shares. Velocities
//! are expressed in distance per step so force and stiffness constants keep
//! the same meaning at the fixed 60 Hz timestep.
//!
//! Contact resolution is out of scope; collision filters are carried as
//! data for point-probe masking only.

use glam::Vec2;

use crate::geometry::polygon_area;
use crate::simulation::config::EngineConfig;
use crate::simulation::world::{
    BodyDef, BodyId, CollisionFilter, ConstraintDef, ConstraintId, PhysicsWorld,
};

const MIN_CONSTRAINT_LENGTH: f32 = 1e-6;

struct RigidBody {
    position: Vec2,
    prev_position: Vec2,
    angle: f32,
    prev_angle: f32,
    force: Vec2,
    torque: f32,
    mass: f32,
    inv_mass: f32,
    inv_inertia: f32,
    friction_air: f32,
    filter: CollisionFilter,
    local_vertices: Vec<Vec2>,
}

/// Deterministic soft-body world implementing [`PhysicsWorld`].
pub struct SoftBodyEngine {
    config: EngineConfig,
    bodies: Vec<Option<RigidBody>>,
    constraints: Vec<Option<ConstraintDef>>,
}

impl SoftBodyEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            bodies: Vec::new(),
            constraints: Vec::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of live bodies.
    pub fn body_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.is_some()).count()
    }

    /// Number of live constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.iter().filter(|c| c.is_some()).count()
    }

    /// The collision tag a body was created with.
    pub fn filter(&self, id: BodyId) -> Option<CollisionFilter> {
        self.body(id).map(|b| b.filter)
    }

    fn body(&self, id: BodyId) -> Option<&RigidBody> {
        self.bodies.get(id.0 as usize).and_then(|b| b.as_ref())
    }

    fn body_mut(&mut self, id: BodyId) -> Option<&mut RigidBody> {
        self.bodies.get_mut(id.0 as usize).and_then(|b| b.as_mut())
    }

    fn integrate(&mut self, dt_ms: f32) {
        let dt_sq = dt_ms * dt_ms;
        let friction_scale = dt_ms / self.config.base_step_ms;
        let gravity = self.config.gravity;

        for body in self.bodies.iter_mut().flatten() {
            let friction = (1.0 - body.friction_air * friction_scale).clamp(0.0, 1.0);

            let accel = body.force * body.inv_mass + gravity;
            let velocity = (body.position - body.prev_position) * friction + accel * dt_sq;
            if velocity.is_finite() {
                body.prev_position = body.position;
                body.position += velocity;
            }

            let angular_accel = body.torque * body.inv_inertia;
            let angular_velocity = (body.angle - body.prev_angle) * friction + angular_accel * dt_sq;
            if angular_velocity.is_finite() {
                body.prev_angle = body.angle;
                body.angle += angular_velocity;
            }

            body.force = Vec2::ZERO;
            body.torque = 0.0;
        }
    }

    fn solve_constraints(&mut self) {
        let max_correction = self.config.max_correction;
        for slot in 0..self.constraints.len() {
            let Some(def) = self.constraints[slot] else { continue };
            let (ia, ib) = (def.body_a.0 as usize, def.body_b.0 as usize);
            if ia == ib {
                continue;
            }
            // Both bodies must still be live; a dangling side is skipped
            // and surfaces through queries on the removed body instead.
            let (Some(a), Some(b)) = (
                self.bodies.get(ia).and_then(|x| x.as_ref()),
                self.bodies.get(ib).and_then(|x| x.as_ref()),
            ) else {
                continue;
            };

            let ra = Vec2::from_angle(a.angle).rotate(def.point_a);
            let rb = Vec2::from_angle(b.angle).rotate(def.point_b);
            let pa = a.position + ra;
            let pb = b.position + rb;

            let delta = pa - pb;
            let length = delta.length().max(MIN_CONSTRAINT_LENGTH);
            let difference = (length - def.rest_length) / length;
            let mut correction = delta * (difference * def.stiffness);
            if !correction.is_finite() {
                continue;
            }
            let correction_len = correction.length();
            if correction_len > max_correction {
                correction *= max_correction / correction_len;
            }

            let total_inv_mass = a.inv_mass + b.inv_mass;
            if total_inv_mass <= 0.0 {
                continue;
            }
            let share_a = a.inv_mass / total_inv_mass;
            let share_b = b.inv_mass / total_inv_mass;

            let normal = delta / length;
            let relative_velocity =
                (a.position - a.prev_position) - (b.position - b.prev_position);
            let normal_velocity = relative_velocity.dot(normal);
            let damping_impulse = normal * (normal_velocity * def.damping);

            let (inv_inertia_a, inv_inertia_b) = (a.inv_inertia, b.inv_inertia);
            {
                let a = self.bodies[ia].as_mut().unwrap();
                a.position -= correction * share_a;
                a.angle -= ra.perp_dot(correction) * inv_inertia_a * share_a;
                a.prev_position += damping_impulse * share_a;
            }
            {
                let b = self.bodies[ib].as_mut().unwrap();
                b.position += correction * share_b;
                b.angle += rb.perp_dot(correction) * inv_inertia_b * share_b;
                b.prev_position -= damping_impulse * share_b;
            }
        }
    }
}

impl PhysicsWorld for SoftBodyEngine {
    fn create_body(&mut self, def: BodyDef) -> BodyId {
        let area = polygon_area(&def.shape);
        let mass = (area * def.material.density).max(f32::EPSILON);
        let inertia = polygon_inertia(&def.shape, mass);

        let body = RigidBody {
            position: def.position,
            prev_position: def.position,
            angle: 0.0,
            prev_angle: 0.0,
            force: Vec2::ZERO,
            torque: 0.0,
            mass,
            inv_mass: 1.0 / mass,
            inv_inertia: 1.0 / inertia,
            friction_air: def.material.friction_air,
            filter: def.filter,
            local_vertices: def.shape,
        };
        self.bodies.push(Some(body));
        BodyId(self.bodies.len() as u32 - 1)
    }

    fn create_constraint(&mut self, def: ConstraintDef) -> ConstraintId {
        self.constraints.push(Some(def));
        ConstraintId(self.constraints.len() as u32 - 1)
    }

    fn remove_body(&mut self, id: BodyId) {
        if let Some(slot) = self.bodies.get_mut(id.0 as usize) {
            *slot = None;
        }
    }

    fn remove_constraint(&mut self, id: ConstraintId) {
        if let Some(slot) = self.constraints.get_mut(id.0 as usize) {
            *slot = None;
        }
    }

    fn apply_force(&mut self, id: BodyId, world_point: Vec2, force: Vec2) {
        if let Some(body) = self.body_mut(id) {
            body.force += force;
            body.torque += (world_point - body.position).perp_dot(force);
        }
    }

    fn set_velocity(&mut self, id: BodyId, velocity: Vec2) {
        if let Some(body) = self.body_mut(id) {
            body.prev_position = body.position - velocity;
        }
    }

    fn set_mass(&mut self, id: BodyId, mass: f32) {
        if let Some(body) = self.body_mut(id) {
            if mass > 0.0 && mass.is_finite() {
                // Inertia scales with mass for a fixed shape
                let inertia = mass / (body.mass * body.inv_inertia);
                body.mass = mass;
                body.inv_mass = 1.0 / mass;
                body.inv_inertia = 1.0 / inertia;
            }
        }
    }

    fn translate(&mut self, id: BodyId, delta: Vec2) {
        if let Some(body) = self.body_mut(id) {
            body.position += delta;
            body.prev_position += delta;
        }
    }

    fn position(&self, id: BodyId) -> Option<Vec2> {
        self.body(id).map(|b| b.position)
    }

    fn angle(&self, id: BodyId) -> Option<f32> {
        self.body(id).map(|b| b.angle)
    }

    fn velocity(&self, id: BodyId) -> Option<Vec2> {
        self.body(id).map(|b| b.position - b.prev_position)
    }

    fn mass(&self, id: BodyId) -> Option<f32> {
        self.body(id).map(|b| b.mass)
    }

    fn vertices_into(&self, id: BodyId, out: &mut Vec<Vec2>) -> bool {
        let Some(body) = self.body(id) else {
            return false;
        };
        let rotation = Vec2::from_angle(body.angle);
        out.extend(
            body.local_vertices
                .iter()
                .map(|v| body.position + rotation.rotate(*v)),
        );
        true
    }

    fn step(&mut self, dt_ms: f32) {
        self.integrate(dt_ms);
        for _ in 0..self.config.constraint_iterations {
            self.solve_constraints();
        }
    }
}

/// Second moment of a polygon about its centroid for the given mass.
fn polygon_inertia(verts: &[Vec2], mass: f32) -> f32 {
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for i in 0..verts.len() {
        let j = verts[i];
        let k = verts[(i + 1) % verts.len()];
        let cross = j.perp_dot(k).abs();
        numerator += cross * (k.dot(k) + k.dot(j) + j.dot(j));
        denominator += cross;
    }
    if denominator <= 0.0 {
        return f32::EPSILON;
    }
    ((mass / 6.0) * (numerator / denominator)).max(f32::EPSILON)
}
