//! Procedural topology builder.
//!
//! Derives the whole body/constraint graph from [`JellyfishParams`]: one
//! bell center, two symmetric rim chains of trapezoids, a jittered number
//! of tentacle chains and tapering arm chains, and the spring network
//! holding them together. All randomness flows through the injected `rng`,
//! so a fixed seed reproduces the topology exactly.

use glam::Vec2;
use rand::Rng;

use crate::creature::assembly::{Assembly, SegmentRole};
use crate::creature::params::{BuildError, CreatureTuning, JellyfishParams};
use crate::geometry::{self, interpolate};
use crate::simulation::{
    category, BodyDef, CollisionFilter, ConstraintDef, Material, PhysicsWorld,
};

/// Builder output: the assembly plus the per-instance swim phase shift.
pub(crate) struct BuiltCreature {
    pub assembly: Assembly,
    pub phase_offset_ms: f32,
}

pub(crate) fn build<W, R>(
    params: &JellyfishParams,
    tuning: &CreatureTuning,
    rng: &mut R,
    world: &mut W,
) -> Result<BuiltCreature, BuildError>
where
    W: PhysicsWorld,
    R: Rng,
{
    params.validate(tuning)?;

    let center = params.center;
    let seg_h = params.width * tuning.head_segment_h_ratio;
    let center_w = params.width * tuning.head_center_w_ratio;
    let rim_n = tuning.rim_segments;
    let seg_w = (params.width - center_w) / rim_n as f32
        - 2.0 * tuning.rim_trapezoid_slope * seg_h;
    if seg_w <= 0.0 {
        return Err(BuildError::DegenerateRimSegment(seg_w));
    }
    // Inner spring anchor sits at the trapezoid's short-edge corner
    let corner_loc = 0.5 - (tuning.rim_trapezoid_slope * seg_h) / seg_w;

    let head_body = world.create_body(BodyDef {
        shape: geometry::rectangle(center_w, seg_h),
        position: center,
        material: Material {
            density: tuning.density,
            friction_air: tuning.head_friction,
        },
        filter: CollisionFilter::new(category::BELL_CENTER, category::MOUSE_PROBE),
    });
    let mut assembly = Assembly::new(head_body, geometry::rectangle(center_w, seg_h));

    build_rim_chains(
        params, tuning, world, &mut assembly, seg_w, seg_h, center_w, corner_loc,
    );
    build_tentacles(params, tuning, rng, world, &mut assembly, seg_h);
    build_arms(params, tuning, rng, world, &mut assembly, seg_h);

    let phase_offset_ms = rng.random_range(0.0..tuning.swim_interval_ms);

    log::debug!(
        "built jellyfish at {:?}: {} segments, {} tentacles, {} arms, {} constraints",
        center,
        assembly.segment_count(),
        assembly.tentacle_count(),
        assembly.arm_count(),
        assembly.constraints().len(),
    );

    Ok(BuiltCreature {
        assembly,
        phase_offset_ms,
    })
}

#[allow(clippy::too_many_arguments)]
fn build_rim_chains<W: PhysicsWorld>(
    params: &JellyfishParams,
    tuning: &CreatureTuning,
    world: &mut W,
    assembly: &mut Assembly,
    seg_w: f32,
    seg_h: f32,
    center_w: f32,
    corner_loc: f32,
) {
    let rim_n = tuning.rim_segments;
    let slope = tuning.rim_trapezoid_slope;
    let material = Material {
        density: tuning.density,
        friction_air: tuning.head_friction,
    };
    let filter = CollisionFilter::new(category::BELL_RIM, category::MOUSE_PROBE);

    for dir in [-1.0f32, 1.0] {
        let mut chain = Vec::with_capacity(rim_n);
        for i in 0..rim_n {
            // Left chain runs outermost-first, right chain innermost-first
            let x = if dir < 0.0 {
                params.center.x - center_w * 0.5 - seg_w * (rim_n as f32 - i as f32 - 0.5)
            } else {
                params.center.x + center_w * 0.5 + seg_w * (i as f32 + 0.5)
            };
            let far = (dir < 0.0 && i == 0) || (dir > 0.0 && i == rim_n - 1);
            let mut shape = geometry::trapezoid(seg_w, seg_h, -slope);
            if far {
                let r = seg_h * 0.5;
                let radii = if dir < 0.0 {
                    [r, r, 0.0, 0.0]
                } else {
                    [0.0, 0.0, r, r]
                };
                shape = geometry::chamfer(&shape, &radii);
            }
            let body = world.create_body(BodyDef {
                shape: shape.clone(),
                position: Vec2::new(x, params.center.y),
                material,
                filter,
            });
            chain.push(assembly.push_segment(SegmentRole::Rim, body, shape, tuning.head_opacity, false));
        }

        // Two parallel spring runs: soft inner corners, stiff outer edge.
        // The stiffness split biases the rim into curling on compression.
        let pairs = [
            (corner_loc, tuning.rim_inner_stiffness, tuning.rim_inner_damping, 0.5),
            (0.5, tuning.rim_outer_stiffness, tuning.rim_outer_damping, -0.5),
        ];
        for (loc, stiffness, damping, y_rel) in pairs {
            for window in chain.windows(2) {
                let id = world.create_constraint(ConstraintDef {
                    body_a: assembly.body(window[0]),
                    body_b: assembly.body(window[1]),
                    point_a: Vec2::new(loc * seg_w, y_rel * seg_h),
                    point_b: Vec2::new(-loc * seg_w, y_rel * seg_h),
                    stiffness,
                    damping,
                    rest_length: tuning.rim_rest_length,
                });
                assembly.push_constraint(id);
            }

            // Pin the innermost segment to the bell center at the same height
            let innermost = if dir < 0.0 {
                *chain.last().expect("rim chain is non-empty")
            } else {
                chain[0]
            };
            let id = world.create_constraint(ConstraintDef {
                body_a: assembly.body(assembly.head()),
                body_b: assembly.body(innermost),
                point_a: Vec2::new(center_w * 0.5 * dir, y_rel * seg_h),
                point_b: Vec2::new(seg_w * loc * -dir, y_rel * seg_h),
                stiffness,
                damping,
                rest_length: tuning.rim_rest_length,
            });
            assembly.push_constraint(id);
        }

        if dir < 0.0 {
            assembly.rim_left = chain;
        } else {
            assembly.rim_right = chain;
        }
    }
}

fn build_tentacles<W: PhysicsWorld, R: Rng>(
    params: &JellyfishParams,
    tuning: &CreatureTuning,
    rng: &mut R,
    world: &mut W,
    assembly: &mut Assembly,
    seg_h: f32,
) {
    let jitter = tuning.tentacle_count_jitter.max(0);
    let count = (tuning.tentacle_base_count as i64 + rng.random_range(-jitter..=jitter) as i64)
        .max(1) as usize;
    let nominal = ((params.tentacle_len / tuning.tentacle_segment_h).floor() as usize).max(1);
    let tentacle_w = params.width * tuning.tentacle_w_ratio;
    let root = params.center + Vec2::new(0.0, seg_h * 0.5);
    let material = Material {
        density: tuning.density,
        friction_air: tuning.tentacle_friction,
    };
    let filter = CollisionFilter::new(category::TENTACLE, 0);

    for _ in 0..count {
        // Shortening never removes more than a third of the nominal length
        let shorten = rng.random_range(0..=nominal / 3);
        let len = (nominal - shorten).max(1);

        let mut chain = Vec::with_capacity(len);
        for i in 0..len {
            let shape = geometry::rectangle(tentacle_w, tuning.tentacle_segment_h);
            let body = world.create_body(BodyDef {
                shape: shape.clone(),
                position: root + Vec2::new(0.0, tuning.tentacle_segment_h * i as f32),
                material,
                filter,
            });
            // The root segment is a pure attachment point, never drawn
            chain.push(assembly.push_segment(
                SegmentRole::Tentacle,
                body,
                shape,
                tuning.tentacle_opacity,
                i != 0,
            ));
        }

        // Two parallel joint springs resist twisting along the chain
        for x_off in [-0.2f32, 0.2] {
            for window in chain.windows(2) {
                let id = world.create_constraint(ConstraintDef {
                    body_a: assembly.body(window[0]),
                    body_b: assembly.body(window[1]),
                    point_a: Vec2::new(x_off * tentacle_w, 0.5 * tuning.tentacle_segment_h),
                    point_b: Vec2::new(x_off * tentacle_w, -0.5 * tuning.tentacle_segment_h),
                    stiffness: tuning.chain_stiffness,
                    damping: 0.0,
                    rest_length: tuning.chain_rest_length,
                });
                assembly.push_constraint(id);
            }
        }
        assembly.tentacles.push(chain);
    }
}

fn build_arms<W: PhysicsWorld, R: Rng>(
    params: &JellyfishParams,
    tuning: &CreatureTuning,
    rng: &mut R,
    world: &mut W,
    assembly: &mut Assembly,
    seg_h: f32,
) {
    let jitter = tuning.arm_count_jitter.max(0);
    let count =
        (tuning.arm_base_count as i64 + rng.random_range(-jitter..=jitter) as i64).max(1) as usize;
    let arm_w = params.width * tuning.arm_w_ratio;
    let gap = params.width * tuning.arm_gap_ratio;
    let nominal = ((params.tentacle_len * tuning.arm_to_tentacle_len / (arm_w * 2.0 * 0.75))
        .floor() as usize)
        .max(1);
    let len_jitter = tuning.arm_length_jitter.min((nominal / 3) as i32).max(0);
    let material = Material {
        density: tuning.density,
        friction_air: tuning.arm_friction,
    };
    let filter = CollisionFilter::new(category::ARM, 0);
    // Parabolic taper: full radius at the root, shrinking toward the tip
    let taper = |x: f32| arm_w * (1.0 - x.clamp(0.0, 1.0).powi(2));

    for a in 0..count {
        let len = (nominal as i64 + rng.random_range(-len_jitter..=len_jitter) as i64).max(1) as usize;
        let rel_x = gap * (a as f32 - (count as f32 - 1.0) * 0.5);
        let x = params.center.x + rel_x;
        let mut y = params.center.y + seg_h;

        let mut chain = Vec::with_capacity(len);
        let mut radii = Vec::with_capacity(len);
        for i in 0..len {
            let radius = interpolate::sample(taper, i, 0, len, 0.0, 1.0);
            let shape = geometry::circle(radius);
            let body = world.create_body(BodyDef {
                shape: shape.clone(),
                position: Vec2::new(x, y + radius),
                material,
                filter,
            });
            y += radius * 2.0;
            let mass = world.mass(body).expect("body was just created");
            world.set_mass(body, mass / tuning.arm_mass_divisor);
            chain.push(assembly.push_segment(SegmentRole::Arm, body, shape, tuning.arm_opacity, true));
            radii.push(radius);
        }

        for (window, radius_pair) in chain.windows(2).zip(radii.windows(2)) {
            let id = world.create_constraint(ConstraintDef {
                body_a: assembly.body(window[0]),
                body_b: assembly.body(window[1]),
                point_a: Vec2::new(0.0, radius_pair[0]),
                point_b: Vec2::new(0.0, -radius_pair[1]),
                stiffness: tuning.chain_stiffness,
                damping: 0.0,
                rest_length: tuning.chain_rest_length,
            });
            assembly.push_constraint(id);
        }

        // Anchor the root under the bell at two symmetric lateral offsets
        let root_body = assembly.body(chain[0]);
        for x_off in [-0.5f32, 0.5] {
            let id = world.create_constraint(ConstraintDef {
                body_a: assembly.body(assembly.head()),
                body_b: root_body,
                point_a: Vec2::new(rel_x, seg_h),
                point_b: Vec2::new(x_off * arm_w, -arm_w * 0.5),
                stiffness: tuning.rim_outer_stiffness,
                damping: 0.0,
                rest_length: arm_w * 0.5,
            });
            assembly.push_constraint(id);
        }
        assembly.arms.push(chain);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::assembly::{SegmentId, SegmentRole};
    use crate::rng::seeded_rng;
    use crate::simulation::{EngineConfig, SoftBodyEngine};

    fn test_params() -> JellyfishParams {
        JellyfishParams {
            center: Vec2::new(400.0, 500.0),
            width: 150.0,
            tentacle_len: 300.0,
            color: [1.0, 0.05, 0.53],
        }
    }

    fn build_default(seed: u64) -> (SoftBodyEngine, Assembly) {
        let mut world = SoftBodyEngine::new(EngineConfig::default());
        let mut rng = seeded_rng(seed);
        let built = build(&test_params(), &CreatureTuning::default(), &mut rng, &mut world)
            .expect("default build should succeed");
        (world, built.assembly)
    }

    #[test]
    fn builds_one_center_and_two_full_rim_chains() {
        let (_, assembly) = build_default(7);
        assert_eq!(assembly.role(assembly.head()), SegmentRole::BellCenter);
        assert_eq!(assembly.rim_left.len(), 10);
        assert_eq!(assembly.rim_right.len(), 10);

        let centers = (0..assembly.segment_count())
            .filter(|i| assembly.role(SegmentId(*i as u32)) == SegmentRole::BellCenter)
            .count();
        assert_eq!(centers, 1);
    }

    #[test]
    fn tentacle_count_stays_within_jitter_band() {
        for seed in 0..40 {
            let (_, assembly) = build_default(seed);
            let count = assembly.tentacle_count();
            assert!((8..=12).contains(&count), "seed {}: count {}", seed, count);
        }
    }

    #[test]
    fn chain_lengths_keep_two_thirds_of_nominal() {
        for seed in 0..40 {
            let (_, assembly) = build_default(seed);
            // Nominal tentacle length: 300 / 10 = 30 segments
            for t in 0..assembly.tentacle_count() {
                let len = assembly.tentacle_len(t);
                assert!(len >= 20 && len <= 30, "seed {}: tentacle len {}", seed, len);
            }
            for a in 0..assembly.arm_count() {
                let len = assembly.arm_len(a);
                assert!(len >= 1, "seed {}: empty arm chain", seed);
                // Nominal 11, jitter bounded by nominal / 3
                assert!(len >= 8 && len <= 14, "seed {}: arm len {}", seed, len);
            }
        }
    }

    #[test]
    fn arm_count_stays_within_jitter_band() {
        for seed in 0..40 {
            let (_, assembly) = build_default(seed);
            let count = assembly.arm_count();
            assert!((3..=5).contains(&count), "seed {}: arm count {}", seed, count);
        }
    }

    #[test]
    fn same_seed_reproduces_identical_topology() {
        let (_, a) = build_default(99);
        let (_, b) = build_default(99);
        assert_eq!(a.segment_count(), b.segment_count());
        assert_eq!(a.tentacle_count(), b.tentacle_count());
        assert_eq!(a.arm_count(), b.arm_count());
        for t in 0..a.tentacle_count() {
            assert_eq!(a.tentacle_len(t), b.tentacle_len(t));
        }
    }

    #[test]
    fn invalid_parameters_fail_fast() {
        let mut world = SoftBodyEngine::new(EngineConfig::default());
        let mut rng = seeded_rng(1);
        let tuning = CreatureTuning::default();

        let mut params = test_params();
        params.width = -5.0;
        assert!(build(&params, &tuning, &mut rng, &mut world).is_err());
        assert_eq!(world.body_count(), 0, "no bodies may leak from a failed build");

        let mut params = test_params();
        params.tentacle_len = 0.0;
        assert!(build(&params, &tuning, &mut rng, &mut world).is_err());
    }

    #[test]
    fn arm_radii_taper_and_stay_positive() {
        let tuning = CreatureTuning::default();
        let params = test_params();
        let arm_w = params.width * tuning.arm_w_ratio;
        let taper = |x: f32| arm_w * (1.0 - x.clamp(0.0, 1.0).powi(2));
        let len = 11;
        let mut prev = f32::MAX;
        for i in 0..len {
            let r = interpolate::sample(taper, i, 0, len, 0.0, 1.0);
            assert!(r > 0.0, "radius {} at index {} must stay positive", r, i);
            assert!(r < prev, "radii must shrink monotonically toward the tip");
            prev = r;
        }
    }
}
