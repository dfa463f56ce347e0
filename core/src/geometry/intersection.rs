//! 2D carrier intersections for the proximity queries.
//!
//! Each intersection reports the parameters on both carriers so callers can
//! filter by segment range or arc sweep. Segment parameters are in [0,1];
//! circle parameters are polar angles.

use super::utils_2d::{angle_of, cross_2d, dot_2d, lerp, sub};
use super::EPSILON;

/// A point shared by two carriers, with the parameter on each.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    pub point: [f64; 2],
    pub param_a: f64,
    pub param_b: f64,
}

/// Intersection of two line segments.
///
/// Parallel (including colinear) segments report no crossing; their closest
/// approach is always found through an endpoint.
pub fn segment_segment(
    s1: [f64; 2], e1: [f64; 2],
    s2: [f64; 2], e2: [f64; 2],
) -> Option<Crossing> {
    let d1 = sub(e1, s1);
    let d2 = sub(e2, s2);

    let denom = cross_2d(d1, d2);
    if denom.abs() < EPSILON {
        return None;
    }

    let w = sub(s2, s1);
    let t = cross_2d(w, d2) / denom;
    let u = cross_2d(w, d1) / denom;

    if (-EPSILON..=1.0 + EPSILON).contains(&t) && (-EPSILON..=1.0 + EPSILON).contains(&u) {
        let t = t.clamp(0.0, 1.0);
        Some(Crossing { point: lerp(s1, e1, t), param_a: t, param_b: u.clamp(0.0, 1.0) })
    } else {
        None
    }
}

/// Intersections of a line segment with a full circle.
/// Returns 0, 1 (touching), or 2 crossings; `param_b` is the circle angle.
pub fn segment_circle(
    start: [f64; 2], end: [f64; 2],
    center: [f64; 2], radius: f64,
) -> Vec<Crossing> {
    let d = sub(end, start);
    let f = sub(start, center);

    let a = dot_2d(d, d);
    let b = 2.0 * dot_2d(f, d);
    let c = dot_2d(f, f) - radius * radius;

    if a < EPSILON * EPSILON {
        return vec![];
    }

    let mut discriminant = b * b - 4.0 * a * c;
    // Grazing contact comes out slightly negative after rounding
    if discriminant < 0.0 {
        if discriminant > -EPSILON * a {
            discriminant = 0.0;
        } else {
            return vec![];
        }
    }

    let sqrt_disc = discriminant.sqrt();
    let t1 = (-b - sqrt_disc) / (2.0 * a);
    let t2 = (-b + sqrt_disc) / (2.0 * a);

    let mut results = Vec::with_capacity(2);
    for (i, t) in [t1, t2].into_iter().enumerate() {
        if i == 1 && (t2 - t1).abs() <= EPSILON {
            break;
        }
        if (-EPSILON..=1.0 + EPSILON).contains(&t) {
            let t = t.clamp(0.0, 1.0);
            let point = lerp(start, end, t);
            results.push(Crossing { point, param_a: t, param_b: angle_of(center, point) });
        }
    }
    results
}

/// Intersections of two full circles.
/// Returns 0, 1 (tangent), or 2 crossings. Concentric circles never cross.
pub fn circle_circle(
    c1: [f64; 2], r1: f64,
    c2: [f64; 2], r2: f64,
) -> Vec<Crossing> {
    let delta = sub(c2, c1);
    let d = dot_2d(delta, delta).sqrt();

    if d < EPSILON || d > r1 + r2 + EPSILON || d < (r1 - r2).abs() - EPSILON {
        return vec![];
    }

    let a = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
    let h = (r1 * r1 - a * a).max(0.0).sqrt();
    let base = [c1[0] + a * delta[0] / d, c1[1] + a * delta[1] / d];

    let crossing = |point: [f64; 2]| Crossing {
        point,
        param_a: angle_of(c1, point),
        param_b: angle_of(c2, point),
    };

    if h < EPSILON {
        return vec![crossing(base)];
    }

    let ox = h * delta[1] / d;
    let oy = h * delta[0] / d;
    vec![
        crossing([base[0] + ox, base[1] - oy]),
        crossing([base[0] - ox, base[1] + oy]),
    ]
}
