//! The procedural jellyfish: parameters, topology builder, assembled
//! state, locomotion, and skin synchronization.

pub mod assembly;
pub mod behavior;
pub mod builder;
pub mod jellyfish;
pub mod params;
pub mod skin;

pub use assembly::{Assembly, SegmentId, SegmentRole};
pub use behavior::SwimPhase;
pub use jellyfish::Jellyfish;
pub use params::{BuildError, CreatureTuning, JellyfishParams};
