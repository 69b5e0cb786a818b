//! Render seam and the fixed-step aquarium driver.

pub mod aquarium;
pub mod null;
pub mod traits;

pub use aquarium::{Aquarium, FIXED_STEP_MS};
pub use null::{NullRenderer, RecordedShape};
pub use traits::{Color, SceneRenderer, ShapeDef, ShapeId};
