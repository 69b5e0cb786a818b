//! # Aquarium: Procedural Soft-Body Jellyfish Simulation
//!
//! Aquarium assembles an ambient, mouse-reactive jellyfish out of spring-
//! connected rigid segments and drives it with a periodic swim cycle. The
//! creature's shape and motion are generated procedurally from a handful of
//! parameters (position, bell width, tentacle length, color) plus bounded
//! per-instance randomness.
//!
//! ## Architecture Overview
//!
//! The crate is organized into five subsystems:
//!
//! ### 1. Creature Core ([`creature`])
//!
//! Procedural assembly and per-tick behavior:
//! - [`creature::builder`] - Derives the body/constraint graph from [`JellyfishParams`]
//! - [`creature::Assembly`] - Arena-style parallel arrays with stable segment ids
//! - [`creature::behavior`] - Compress/thrust/rest swim cycle with clamped steering
//! - [`creature::skin`] - Per-tick convex-hull skin and tentacle re-attachment
//! - [`creature::Jellyfish`] - Host-facing lifecycle facade
//!
//! **Key Design**: Randomness is confined to construction time behind an
//! injected generator, so a fixed seed reproduces a creature exactly.
//!
//! ### 2. Simulation Seam ([`simulation`])
//!
//! The physics engine consumed through a narrow trait:
//! - [`simulation::PhysicsWorld`] - Body/constraint creation, forces, queries, stepping
//! - [`simulation::SoftBodyEngine`] - Built-in deterministic CPU implementation
//! - [`simulation::EngineConfig`] - Configurable integration parameters
//!
//! ### 3. Render Seam ([`scene`])
//!
//! The 2D renderer consumed through a narrow trait:
//! - [`scene::SceneRenderer`] - Filled polygon shapes with transforms and styles
//! - [`scene::NullRenderer`] - Recording renderer for headless runs and tests
//! - [`scene::Aquarium`] - Fixed-step driver owning world, scene, and creatures
//!
//! ### 4. Geometry ([`geometry`])
//!
//! Convex hulls, point containment, polygon shape builders, and the
//! index-range interpolation used for arm tapering.
//!
//! ### 5. Interaction ([`input`])
//!
//! Hover detection against the bell hull with eased opacity/color
//! transitions driven purely by elapsed time.
//!
//! ## Quick Start
//!
//! ```
//! use aquarium::{
//!     Aquarium, CreatureTuning, EngineConfig, Jellyfish, JellyfishParams, NullRenderer,
//!     SoftBodyEngine,
//! };
//! use glam::Vec2;
//!
//! let mut world = SoftBodyEngine::new(EngineConfig::default());
//! let mut rng = aquarium::rng::seeded_rng(7);
//! let jellyfish = Jellyfish::build(
//!     JellyfishParams {
//!         center: Vec2::new(400.0, 500.0),
//!         width: 150.0,
//!         tentacle_len: 300.0,
//!         color: [1.0, 0.05, 0.53],
//!     },
//!     CreatureTuning::default(),
//!     &mut rng,
//!     &mut world,
//! )
//! .expect("valid parameters");
//!
//! let mut aquarium = Aquarium::new(world, NullRenderer::new());
//! aquarium.add_jellyfish(jellyfish);
//! aquarium.tick(1000.0 / 60.0);
//! ```

pub mod creature;
pub mod geometry;
pub mod input;
pub mod rng;
pub mod scene;
pub mod simulation;

pub use creature::{
    Assembly, BuildError, CreatureTuning, Jellyfish, JellyfishParams, SegmentId, SegmentRole,
    SwimPhase,
};
pub use input::{HoverState, HoverTransition, Tween};
pub use scene::{Aquarium, Color, NullRenderer, SceneRenderer, ShapeDef, ShapeId, FIXED_STEP_MS};
pub use simulation::{
    BodyDef, BodyId, CollisionFilter, ConstraintDef, ConstraintId, EngineConfig, Material,
    PhysicsWorld, SoftBodyEngine,
};
