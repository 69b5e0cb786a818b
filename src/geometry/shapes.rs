//! Polygon builders for segment shapes.
//!
//! All builders return local-space vertex lists centered on the shape
//! centroid, in the screen convention used throughout the crate (+y down).
//! These feed [`BodyDef`](crate::simulation::BodyDef) shapes and the
//! per-segment render polygons.

use glam::Vec2;

use super::hull::centroid;

/// Axis-aligned rectangle centered at the origin.
pub fn rectangle(width: f32, height: f32) -> Vec<Vec2> {
    let hw = width * 0.5;
    let hh = height * 0.5;
    vec![
        Vec2::new(-hw, -hh),
        Vec2::new(hw, -hh),
        Vec2::new(hw, hh),
        Vec2::new(-hw, hh),
    ]
}

/// Trapezoid with the given base width, height and slope.
///
/// `slope` is the inset of each top corner as a fraction of the width; a
/// negative slope widens the top edge instead. The result is re-centered on
/// its centroid.
pub fn trapezoid(width: f32, height: f32, slope: f32) -> Vec<Vec2> {
    let s = slope * 0.5;
    let mut verts = vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(width * s, -height),
        Vec2::new(width * (1.0 - s), -height),
        Vec2::new(width, 0.0),
    ];
    recenter(&mut verts);
    verts
}

/// Regular polygon approximation of a circle, centered at the origin.
///
/// The side count grows with the radius, clamped to keep tiny arm-tip
/// segments from collapsing and large segments from over-tessellating.
pub fn circle(radius: f32) -> Vec<Vec2> {
    let sides = (radius.ceil() as usize).clamp(10, 25);
    let mut verts = Vec::with_capacity(sides);
    for i in 0..sides {
        let theta = std::f32::consts::TAU * i as f32 / sides as f32;
        verts.push(Vec2::new(theta.cos(), theta.sin()) * radius);
    }
    verts
}

/// Round off selected corners of a polygon.
///
/// `radii[i]` is the rounding radius for vertex `i`; zero leaves the corner
/// untouched. Each rounded corner becomes a three-point arc pulled back
/// along both adjacent edges. The result is re-centered on its centroid.
pub fn chamfer(verts: &[Vec2], radii: &[f32]) -> Vec<Vec2> {
    let n = verts.len();
    let mut out = Vec::with_capacity(n + radii.iter().filter(|r| **r > 0.0).count() * 2);
    for i in 0..n {
        let radius = radii.get(i).copied().unwrap_or(0.0);
        let v = verts[i];
        if radius <= 0.0 {
            out.push(v);
            continue;
        }
        let prev = verts[(i + n - 1) % n];
        let next = verts[(i + 1) % n];
        let to_prev = (prev - v).normalize_or_zero();
        let to_next = (next - v).normalize_or_zero();
        let a = v + to_prev * radius.min((prev - v).length() * 0.5);
        let b = v + to_next * radius.min((next - v).length() * 0.5);
        let mid = (a + b) * 0.5;
        out.push(a);
        out.push(mid + (v - mid) * 0.5);
        out.push(b);
    }
    recenter(&mut out);
    out
}

/// Axis-aligned bounds (width, height) of a local polygon.
pub fn local_bounds(verts: &[Vec2]) -> Vec2 {
    let mut min = Vec2::splat(f32::MAX);
    let mut max = Vec2::splat(f32::MIN);
    for v in verts {
        min = min.min(*v);
        max = max.max(*v);
    }
    max - min
}

fn recenter(verts: &mut [Vec2]) {
    let c = centroid(verts);
    for v in verts.iter_mut() {
        *v -= c;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::hull::polygon_area;

    #[test]
    fn rectangle_has_expected_area_and_bounds() {
        let r = rectangle(4.0, 2.0);
        assert_eq!(r.len(), 4);
        assert!((polygon_area(&r) - 8.0).abs() < 1e-5);
        assert!((local_bounds(&r) - Vec2::new(4.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn trapezoid_is_centered_on_centroid() {
        let t = trapezoid(9.0, 15.0, -0.1);
        let c = centroid(&t);
        assert!(c.length() < 1e-4, "centroid should be at origin, got {:?}", c);
        assert!(polygon_area(&t) > 0.0);
    }

    #[test]
    fn negative_slope_widens_the_top_edge() {
        let t = trapezoid(10.0, 10.0, -0.2);
        // Vertices 1 and 2 form the top edge (-y side)
        let top = (t[2] - t[1]).length();
        let bottom = (t[3] - t[0]).length();
        assert!(top > bottom, "top {} should exceed bottom {}", top, bottom);
    }

    #[test]
    fn circle_side_count_tracks_radius() {
        assert_eq!(circle(1.0).len(), 10);
        assert_eq!(circle(100.0).len(), 25);
        let c = circle(12.0);
        for v in &c {
            assert!((v.length() - 12.0).abs() < 1e-4);
        }
    }

    #[test]
    fn chamfer_rounds_only_requested_corners() {
        let r = rectangle(10.0, 10.0);
        let out = chamfer(&r, &[5.0, 5.0, 0.0, 0.0]);
        // Two corners replaced by 3 points each: 2 + 3 + 3 = 8
        assert_eq!(out.len(), 8);
        assert!(polygon_area(&out) < polygon_area(&r));
    }
}
