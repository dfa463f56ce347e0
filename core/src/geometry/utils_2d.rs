//! 2D geometry utilities for the working plane.
//!
//! Pure functions over `[f64; 2]` points and vectors, shared by the
//! shape proximity queries and the relationship classifier.

use std::f64::consts::TAU;

use super::EPSILON;

// =============================================================================
// Point Operations
// =============================================================================

/// Compute squared distance between two 2D points.
#[inline]
pub fn distance_squared(p1: [f64; 2], p2: [f64; 2]) -> f64 {
    let dx = p2[0] - p1[0];
    let dy = p2[1] - p1[1];
    dx * dx + dy * dy
}

/// Compute distance between two 2D points.
#[inline]
pub fn distance(p1: [f64; 2], p2: [f64; 2]) -> f64 {
    distance_squared(p1, p2).sqrt()
}

/// Linear interpolation between two 2D points.
#[inline]
pub fn lerp(p1: [f64; 2], p2: [f64; 2], t: f64) -> [f64; 2] {
    [
        p1[0] + t * (p2[0] - p1[0]),
        p1[1] + t * (p2[1] - p1[1]),
    ]
}

/// Vector from `from` to `to`.
#[inline]
pub fn sub(to: [f64; 2], from: [f64; 2]) -> [f64; 2] {
    [to[0] - from[0], to[1] - from[1]]
}

// =============================================================================
// Vector Operations
// =============================================================================

/// 2D cross product (z-component of 3D cross product).
/// Positive if v2 is counter-clockwise from v1.
#[inline]
pub fn cross_2d(v1: [f64; 2], v2: [f64; 2]) -> f64 {
    v1[0] * v2[1] - v1[1] * v2[0]
}

/// 2D dot product.
#[inline]
pub fn dot_2d(v1: [f64; 2], v2: [f64; 2]) -> f64 {
    v1[0] * v2[0] + v1[1] * v2[1]
}

#[inline]
pub fn length_2d(v: [f64; 2]) -> f64 {
    dot_2d(v, v).sqrt()
}

/// Normalize a 2D vector. Returns `None` for a zero-length vector.
#[inline]
pub fn normalize_2d(v: [f64; 2]) -> Option<[f64; 2]> {
    let len = length_2d(v);
    if len < EPSILON {
        None
    } else {
        Some([v[0] / len, v[1] / len])
    }
}

// =============================================================================
// Line Segment Operations
// =============================================================================

/// Find parameter t where point projects onto the line through start and end.
/// Returns t such that point ≈ start + t * (end - start).
/// t in [0,1] means projection is on segment.
pub fn project_point_on_line(start: [f64; 2], end: [f64; 2], point: [f64; 2]) -> f64 {
    let d = sub(end, start);
    let len_sq = dot_2d(d, d);

    if len_sq < EPSILON * EPSILON {
        return 0.0;
    }

    dot_2d(sub(point, start), d) / len_sq
}

/// Closest point on a line segment, with its clamped parameter.
pub fn closest_point_on_segment(start: [f64; 2], end: [f64; 2], point: [f64; 2]) -> ([f64; 2], f64) {
    let t = project_point_on_line(start, end, point).clamp(0.0, 1.0);
    (lerp(start, end, t), t)
}

// =============================================================================
// Arc Utilities
// =============================================================================

/// Compute a point on a circle given center, radius, and angle (radians).
#[inline]
pub fn arc_point(center: [f64; 2], radius: f64, angle: f64) -> [f64; 2] {
    [
        center[0] + radius * angle.cos(),
        center[1] + radius * angle.sin(),
    ]
}

/// Polar angle of `point` around `center`, in [0, 2π).
/// A point at the center maps to angle 0.
pub fn angle_of(center: [f64; 2], point: [f64; 2]) -> f64 {
    let v = sub(point, center);
    if length_2d(v) < EPSILON {
        return 0.0;
    }
    normalize_angle(v[1].atan2(v[0]))
}

/// Wrap an angle into [0, 2π).
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    if a >= TAU { 0.0 } else { a }
}

/// Counter-clockwise sweep from `start_angle` to `end_angle`, in (0, 2π].
pub fn ccw_sweep(start_angle: f64, end_angle: f64) -> f64 {
    let sweep = normalize_angle(end_angle - start_angle);
    if sweep < EPSILON { TAU } else { sweep }
}

/// True if `angle` lies on the counter-clockwise sweep from `start_angle` to `end_angle`.
pub fn angle_in_sweep(angle: f64, start_angle: f64, end_angle: f64) -> bool {
    normalize_angle(angle - start_angle) <= ccw_sweep(start_angle, end_angle) + EPSILON
}

// =============================================================================
// Tests
// =============================================================================
