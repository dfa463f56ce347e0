use nalgebra as na;

pub type Point3 = na::Point3<f64>;

/// Numeric guard for degenerate vectors and parallel carriers.
/// Not a modelling tolerance; see `inference::Tolerance` for that.
pub const EPSILON: f64 = 1e-9;

pub mod utils_2d;

pub mod intersection;

pub mod shape;
pub use shape::{Feature, Proximity, Shape};

/// Drop the third coordinate of a point lying in the working plane.
#[inline]
pub fn to_plane(p: &Point3) -> [f64; 2] {
    [p.x, p.y]
}
