use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Engine configuration for deterministic simulation.
///
/// All values are deterministic and produce identical results across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Fixed timestep in milliseconds (60 Hz)
    pub fixed_timestep_ms: f32,

    /// World gravity, applied as force per unit mass each step
    pub gravity: Vec2,

    /// Constraint relaxation passes per step
    pub constraint_iterations: u32,

    /// Reference step length for scaling per-step air friction
    pub base_step_ms: f32,

    /// Hard cap on positional correction per constraint pass
    pub max_correction: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fixed_timestep_ms: 1000.0 / 60.0,
            gravity: Vec2::ZERO,
            constraint_iterations: 2,
            base_step_ms: 1000.0 / 60.0,
            max_correction: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_zero_gravity_60hz() {
        let config = EngineConfig::default();
        assert_eq!(config.gravity, Vec2::ZERO);
        assert!((config.fixed_timestep_ms - 16.6667).abs() < 1e-2);
        assert!(config.constraint_iterations > 0);
    }
}
