//! Creature parameters and tuning constants.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::scene::Color;

/// Per-instance construction input. Immutable after build.
#[derive(Debug, Clone, Copy)]
pub struct JellyfishParams {
    /// World position of the bell center
    pub center: Vec2,
    /// Overall bell width
    pub width: f32,
    /// Nominal tentacle length
    pub tentacle_len: f32,
    /// Fill color shared by bell, tentacles and arms
    pub color: Color,
}

/// Construction failure. The builder refuses degenerate geometry rather
/// than clamping it into shape.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("bell width must be positive, got {0}")]
    NonPositiveWidth(f32),
    #[error("tentacle length must be positive, got {0}")]
    NonPositiveTentacleLength(f32),
    #[error("{what} baseline count must be at least 1")]
    ZeroBaselineCount { what: &'static str },
    #[error("rim segment width collapsed to {0} (width too small for the configured slope)")]
    DegenerateRimSegment(f32),
}

/// Shared tuning for every jellyfish built from one configuration.
///
/// All ratios are relative to the creature's bell width unless noted.
/// Defaults carry the canonical constants the motion was tuned against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatureTuning {
    /// Air friction of bell segments
    pub head_friction: f32,
    /// Resting opacity of the bell skin
    pub head_opacity: f32,
    /// Bell skin opacity while hovered
    pub hover_opacity: f32,
    /// Trapezoid segments per rim chain (fixed, both sides)
    pub rim_segments: usize,
    /// Bell segment height as a fraction of width
    pub head_segment_h_ratio: f32,
    /// Bell center width as a fraction of width
    pub head_center_w_ratio: f32,
    /// Stiffness of the outer-edge rim springs
    pub rim_outer_stiffness: f32,
    /// Stiffness of the inner-corner rim springs
    pub rim_inner_stiffness: f32,
    pub rim_outer_damping: f32,
    pub rim_inner_damping: f32,
    /// Rest length of all rim springs
    pub rim_rest_length: f32,
    /// Trapezoid slope of rim segments
    pub rim_trapezoid_slope: f32,

    /// Stiffness of tentacle/arm chain joints
    pub chain_stiffness: f32,
    /// Rest length of chain joints
    pub chain_rest_length: f32,

    /// Baseline tentacle count before jitter
    pub tentacle_base_count: usize,
    /// Inclusive jitter applied to the tentacle count
    pub tentacle_count_jitter: i32,
    /// Height of one tentacle segment (absolute)
    pub tentacle_segment_h: f32,
    /// Tentacle segment width as a fraction of width
    pub tentacle_w_ratio: f32,
    pub tentacle_friction: f32,
    pub tentacle_opacity: f32,

    /// Baseline arm count before jitter
    pub arm_base_count: usize,
    /// Inclusive jitter applied to the arm count
    pub arm_count_jitter: i32,
    /// Arm root radius as a fraction of width
    pub arm_w_ratio: f32,
    /// Lateral gap between arm roots as a fraction of width
    pub arm_gap_ratio: f32,
    pub arm_friction: f32,
    pub arm_opacity: f32,
    /// Arm length as a fraction of tentacle length
    pub arm_to_tentacle_len: f32,
    /// Arm segment mass is divided by this so arms trail lightly
    pub arm_mass_divisor: f32,
    /// Upper bound on arm chain-length jitter (segments)
    pub arm_length_jitter: i32,

    /// Mass per unit area of all segments
    pub density: f32,

    /// Full swim cycle length
    pub swim_interval_ms: f32,
    /// Compress phase length at the start of each cycle
    pub compress_duration_ms: f32,
    /// Thrust phase length following compress
    pub thrust_duration_ms: f32,
    /// Magnitude of each rim far-end compress force
    pub compress_force: f32,
    /// Magnitude of the bell-center thrust force
    pub thrust_force: f32,

    /// Fraction of the heading error steered per thrust
    pub steer_gain: f32,
    /// Hard bound on the steering offset, radians
    pub max_turn_rad: f32,

    /// Fraction of the anchor offset converted to root velocity per tick
    pub attachment_gain: f32,

    /// Opacity ease duration on hover transitions
    pub opacity_ease_ms: f32,
    /// Color ease duration on retint
    pub color_ease_ms: f32,
}

impl Default for CreatureTuning {
    fn default() -> Self {
        Self {
            head_friction: 0.01,
            head_opacity: 0.85,
            hover_opacity: 1.0,
            rim_segments: 10,
            head_segment_h_ratio: 0.1,
            head_center_w_ratio: 0.2,
            rim_outer_stiffness: 0.9,
            rim_inner_stiffness: 0.1,
            rim_outer_damping: 1.0,
            rim_inner_damping: 1.0,
            rim_rest_length: 0.0,
            rim_trapezoid_slope: 0.1,

            chain_stiffness: 0.4,
            chain_rest_length: 0.0,

            tentacle_base_count: 10,
            tentacle_count_jitter: 2,
            tentacle_segment_h: 10.0,
            tentacle_w_ratio: 0.01,
            tentacle_friction: 0.015,
            tentacle_opacity: 0.7,

            arm_base_count: 4,
            arm_count_jitter: 1,
            arm_w_ratio: 0.07,
            arm_gap_ratio: 0.05,
            arm_friction: 0.02,
            arm_opacity: 0.75,
            arm_to_tentacle_len: 0.6,
            arm_mass_divisor: 5.0,
            arm_length_jitter: 5,

            density: 0.001,

            swim_interval_ms: 2000.0,
            compress_duration_ms: 500.0,
            thrust_duration_ms: 400.0,
            compress_force: 0.00007,
            thrust_force: 0.0001,

            steer_gain: 0.5,
            max_turn_rad: 0.35,

            attachment_gain: 0.5,

            opacity_ease_ms: 250.0,
            color_ease_ms: 600.0,
        }
    }
}

impl JellyfishParams {
    /// Reject parameters that would produce degenerate geometry.
    pub fn validate(&self, tuning: &CreatureTuning) -> Result<(), BuildError> {
        if !(self.width > 0.0) {
            return Err(BuildError::NonPositiveWidth(self.width));
        }
        if !(self.tentacle_len > 0.0) {
            return Err(BuildError::NonPositiveTentacleLength(self.tentacle_len));
        }
        if tuning.rim_segments == 0 {
            return Err(BuildError::ZeroBaselineCount { what: "rim segment" });
        }
        if tuning.tentacle_base_count == 0 {
            return Err(BuildError::ZeroBaselineCount { what: "tentacle" });
        }
        if tuning.arm_base_count == 0 {
            return Err(BuildError::ZeroBaselineCount { what: "arm" });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tuning_matches_canonical_constants() {
        let tuning = CreatureTuning::default();
        assert_eq!(tuning.rim_segments, 10);
        assert_eq!(tuning.tentacle_base_count, 10);
        assert_eq!(tuning.arm_base_count, 4);
        assert!((tuning.swim_interval_ms - 2000.0).abs() < f32::EPSILON);
        assert!(
            tuning.compress_duration_ms + tuning.thrust_duration_ms < tuning.swim_interval_ms,
            "the cycle must leave room for a rest phase"
        );
    }

    #[test]
    fn validate_rejects_non_positive_dimensions() {
        let tuning = CreatureTuning::default();
        let mut params = JellyfishParams {
            center: Vec2::ZERO,
            width: 150.0,
            tentacle_len: 300.0,
            color: [1.0, 0.05, 0.53],
        };
        assert!(params.validate(&tuning).is_ok());

        params.width = 0.0;
        assert!(matches!(
            params.validate(&tuning),
            Err(BuildError::NonPositiveWidth(_))
        ));

        params.width = 150.0;
        params.tentacle_len = -10.0;
        assert!(matches!(
            params.validate(&tuning),
            Err(BuildError::NonPositiveTentacleLength(_))
        ));

        params.tentacle_len = f32::NAN;
        assert!(params.validate(&tuning).is_err(), "NaN must not validate");
    }
}
