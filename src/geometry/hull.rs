//! Convex hull, centroid, and point containment over `Vec2` polygons.
//!
//! The bell skin is rebuilt every tick from the current rim vertex cloud,
//! so the hull routine is written to reuse caller-owned buffers instead of
//! allocating per call.

use glam::Vec2;

/// Minimum distinct points for a non-degenerate hull.
pub const MIN_HULL_POINTS: usize = 3;

/// Compute the convex hull of `points` into `out` (monotone chain).
///
/// Output vertices are in counter-clockwise order (mathematical winding).
/// Returns `false` with `out` cleared when fewer than [`MIN_HULL_POINTS`]
/// distinct points remain after deduplication or the input is collinear.
///
/// `scratch` holds the sorted working copy between calls; both buffers keep
/// their capacity across ticks.
pub fn convex_hull_into(points: &[Vec2], scratch: &mut Vec<Vec2>, out: &mut Vec<Vec2>) -> bool {
    out.clear();
    scratch.clear();
    scratch.extend(points.iter().copied().filter(|p| p.is_finite()));
    scratch.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    scratch.dedup_by(|a, b| (*a - *b).length_squared() < 1e-12);

    if scratch.len() < MIN_HULL_POINTS {
        return false;
    }

    // Lower hull
    for &p in scratch.iter() {
        while out.len() >= 2 && cross(out[out.len() - 2], out[out.len() - 1], p) <= 0.0 {
            out.pop();
        }
        out.push(p);
    }
    // Upper hull
    let lower_len = out.len() + 1;
    for &p in scratch.iter().rev().skip(1) {
        while out.len() >= lower_len && cross(out[out.len() - 2], out[out.len() - 1], p) <= 0.0 {
            out.pop();
        }
        out.push(p);
    }
    out.pop();

    if out.len() < MIN_HULL_POINTS {
        out.clear();
        return false;
    }
    true
}

fn cross(o: Vec2, a: Vec2, b: Vec2) -> f32 {
    (a - o).perp_dot(b - o)
}

/// Area centroid of a simple polygon.
///
/// Falls back to the vertex average when the polygon area is near zero.
pub fn centroid(polygon: &[Vec2]) -> Vec2 {
    if polygon.is_empty() {
        return Vec2::ZERO;
    }
    let mut area2 = 0.0;
    let mut acc = Vec2::ZERO;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[(i + 1) % polygon.len()];
        let c = a.perp_dot(b);
        area2 += c;
        acc += (a + b) * c;
    }
    if area2.abs() < 1e-9 {
        let sum: Vec2 = polygon.iter().copied().sum();
        return sum / polygon.len() as f32;
    }
    acc / (3.0 * area2)
}

/// Absolute area of a simple polygon (shoelace).
pub fn polygon_area(polygon: &[Vec2]) -> f32 {
    let mut area2 = 0.0;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[(i + 1) % polygon.len()];
        area2 += a.perp_dot(b);
    }
    (area2 * 0.5).abs()
}

/// Even-odd point-in-polygon test. Winding-agnostic.
pub fn contains(polygon: &[Vec2], point: Vec2) -> bool {
    if polygon.len() < MIN_HULL_POINTS {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hull_of(points: &[Vec2]) -> Vec<Vec2> {
        let mut scratch = Vec::new();
        let mut out = Vec::new();
        assert!(convex_hull_into(points, &mut scratch, &mut out));
        out
    }

    #[test]
    fn hull_of_square_with_interior_point() {
        let points = [
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(4.0, 4.0),
            Vec2::new(0.0, 4.0),
            Vec2::new(2.0, 2.0), // interior, must be dropped
        ];
        let hull = hull_of(&points);
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&Vec2::new(2.0, 2.0)));
    }

    #[test]
    fn hull_rejects_degenerate_input() {
        let mut scratch = Vec::new();
        let mut out = Vec::new();
        assert!(!convex_hull_into(&[], &mut scratch, &mut out));
        assert!(!convex_hull_into(&[Vec2::ZERO, Vec2::ONE], &mut scratch, &mut out));
        // Duplicates of two distinct points are still degenerate
        let dups = [Vec2::ZERO, Vec2::ZERO, Vec2::ONE, Vec2::ONE];
        assert!(!convex_hull_into(&dups, &mut scratch, &mut out));
    }

    #[test]
    fn hull_winding_is_counter_clockwise() {
        let hull = hull_of(&[
            Vec2::new(0.0, 0.0),
            Vec2::new(3.0, 1.0),
            Vec2::new(2.0, 3.0),
            Vec2::new(-1.0, 2.0),
        ]);
        let mut area2 = 0.0;
        for i in 0..hull.len() {
            area2 += hull[i].perp_dot(hull[(i + 1) % hull.len()]);
        }
        assert!(area2 > 0.0, "expected CCW winding, signed area {}", area2);
    }

    #[test]
    fn centroid_of_square_is_center() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(0.0, 2.0),
        ];
        let c = centroid(&square);
        assert!((c - Vec2::new(1.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn contains_inside_and_outside() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(0.0, 2.0),
        ];
        assert!(contains(&square, Vec2::new(1.0, 1.0)));
        assert!(!contains(&square, Vec2::new(3.0, 1.0)));
        assert!(!contains(&square, Vec2::new(-50.0, 100.0)));
    }
}
