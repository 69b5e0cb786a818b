//! Locomotion state machine.
//!
//! One swim cycle is compress → thrust → rest, selected purely from the
//! behavior clock modulo the cycle length. Compress pushes the two rim far
//! ends apart to draw the bell wide; thrust fires a single larger force at
//! the bell center along the current heading; rest is the remainder of the
//! interval. The heading is re-derived every tick from the deformed rim, so
//! steering reacts to the bell's actual shape.

use glam::Vec2;

use crate::creature::assembly::Assembly;
use crate::creature::params::CreatureTuning;
use crate::simulation::PhysicsWorld;

/// Phase of the swim cycle at a given clock value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwimPhase {
    Compress,
    Thrust,
    Rest,
}

/// Select the swim phase for a clock value. Pure in `clock_ms`.
pub fn phase_at(clock_ms: f32, tuning: &CreatureTuning) -> SwimPhase {
    let t = clock_ms.rem_euclid(tuning.swim_interval_ms);
    if t < tuning.compress_duration_ms {
        SwimPhase::Compress
    } else if t < tuning.compress_duration_ms + tuning.thrust_duration_ms {
        SwimPhase::Thrust
    } else {
        SwimPhase::Rest
    }
}

/// Signed steering offset toward `target`, clamped to the turn limit.
///
/// Positive offsets steer right (clockwise in screen coordinates).
pub fn steering_offset(heading: Vec2, from: Vec2, target: Vec2, tuning: &CreatureTuning) -> f32 {
    let to_target = target - from;
    if to_target.length_squared() < 1e-6 || heading.length_squared() < 1e-6 {
        return 0.0;
    }
    let error = heading.perp_dot(to_target).atan2(heading.dot(to_target));
    (error * tuning.steer_gain).clamp(-tuning.max_turn_rad, tuning.max_turn_rad)
}

/// Apply this tick's behavior force, if the current phase has one.
pub fn apply<W: PhysicsWorld>(
    world: &mut W,
    assembly: &Assembly,
    tuning: &CreatureTuning,
    clock_ms: f32,
    target: Option<Vec2>,
) {
    let (far_left, far_right) = assembly.rim_far_ends();
    let left_pos = world
        .position(assembly.body(far_left))
        .expect("rim far-end body missing from physics world");
    let right_pos = world
        .position(assembly.body(far_right))
        .expect("rim far-end body missing from physics world");
    let base = right_pos - left_pos;
    if base.length_squared() < 1e-6 {
        return;
    }

    match phase_at(clock_ms, tuning) {
        SwimPhase::Compress => {
            // Push the far ends outward along slightly raised diagonals
            let right_dir = rotate(base, -core::f32::consts::PI * 0.1).normalize_or_zero();
            let left_dir = rotate(base, -core::f32::consts::PI * 0.9).normalize_or_zero();
            world.apply_force(
                assembly.body(far_left),
                left_pos,
                left_dir * tuning.compress_force,
            );
            world.apply_force(
                assembly.body(far_right),
                right_pos,
                right_dir * tuning.compress_force,
            );
        }
        SwimPhase::Thrust => {
            let head_body = assembly.body(assembly.head());
            let head_pos = world
                .position(head_body)
                .expect("bell center body missing from physics world");
            let heading = rotate(base, -core::f32::consts::PI * 0.5).normalize_or_zero();
            let offset = match target {
                Some(point) => steering_offset(heading, head_pos, point, tuning),
                None => 0.0,
            };
            let push = rotate(heading, offset);
            world.apply_force(head_body, head_pos, push * tuning.thrust_force);
        }
        SwimPhase::Rest => {}
    }
}

fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}
