//! Physics seam and the built-in deterministic CPU engine.
//!
//! The creature core drives any [`PhysicsWorld`]; [`SoftBodyEngine`] is the
//! crate's own fixed-step implementation for headless hosts and tests.

pub mod config;
pub mod engine;
pub mod world;

pub use config::EngineConfig;
pub use engine::SoftBodyEngine;
pub use world::{
    category, BodyDef, BodyId, CollisionFilter, ConstraintDef, ConstraintId, Material,
    PhysicsWorld,
};
