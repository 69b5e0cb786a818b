//! 2D geometry: convex hulls, point containment, polygon shape builders,
//! and index-range interpolation.

pub mod hull;
pub mod interpolate;
pub mod shapes;

pub use hull::{centroid, contains, convex_hull_into, polygon_area, MIN_HULL_POINTS};
pub use shapes::{chamfer, circle, local_bounds, rectangle, trapezoid};
