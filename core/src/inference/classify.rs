//! Relationship classifier.
//!
//! Per-geometry orientation checks and pairwise curve relations. Predicates
//! never fail: anything the host cannot resolve means the relation does not
//! hold.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::tolerance::Tolerance;
use super::types::{Geometry, GeometryKind, Orientation, Point, PointRef, PointRole};
use crate::geometry::utils_2d::cross_2d;
use crate::geometry::Shape;
use crate::topo::EntityId;

fn endpoints(g: &Geometry) -> Option<([f64; 2], [f64; 2])> {
    if g.kind != GeometryKind::LineSegment {
        return None;
    }
    let start = g.point(PointRole::Start)?;
    let end = g.point(PointRole::End)?;
    Some((start.position, end.position))
}

pub fn is_horizontal(g: &Geometry, tolerance: &Tolerance) -> bool {
    endpoints(g).is_some_and(|(start, end)| tolerance.are_equal(start[1], end[1]))
}

pub fn is_vertical(g: &Geometry, tolerance: &Tolerance) -> bool {
    endpoints(g).is_some_and(|(start, end)| tolerance.are_equal(start[0], end[0]))
}

/// Horizontal is tested first; vertical is only considered when the
/// segment is not horizontal.
pub fn classify_orientation(g: &Geometry, tolerance: &Tolerance) -> Orientation {
    if is_horizontal(g, tolerance) {
        Orientation::Horizontal
    } else if is_vertical(g, tolerance) {
        Orientation::Vertical
    } else {
        Orientation::None
    }
}

/// Set the orientation of every line segment. Other kinds keep `None`.
pub fn classify_geometries(geometries: &mut [Geometry], tolerance: &Tolerance) {
    for g in geometries.iter_mut().filter(|g| g.kind == GeometryKind::LineSegment) {
        g.orientation = classify_orientation(g, tolerance);
    }
}

/// True if `point` lies on `g` away from its vertices.
///
/// A point coincident with a vertex of `g` (under the same axis-wise test
/// clustering uses) is coincidence, not point-along-curve.
pub fn is_point_along_curve(point: &Point, g: &Geometry, tolerance: &Tolerance) -> bool {
    if point.reference.entity == g.id {
        return false;
    }
    if g.shape.vertices().iter().any(|(v, _)| tolerance.are_coincident(point.position, *v)) {
        return false;
    }
    let probe = Shape::Vertex { pos: point.position };
    match probe.nearest(&g.shape, tolerance.distance()) {
        Some(prox) => tolerance.is_zero(prox.distance) && !prox.feature_b.is_vertex(),
        None => false,
    }
}

/// True if the curves touch with parallel tangents, excluding shared-vertex contact.
pub fn are_curves_tangent(g1: &Geometry, g2: &Geometry, tolerance: &Tolerance) -> bool {
    let Some(prox) = g1.shape.nearest(&g2.shape, tolerance.distance()) else {
        return false;
    };
    if !tolerance.is_zero(prox.distance) || prox.is_vertex_to_vertex() {
        return false;
    }
    let (Some(t1), Some(t2)) = (g1.shape.tangent_at(prox.param_a), g2.shape.tangent_at(prox.param_b)) else {
        return false;
    };
    cross_2d(t1, t2).abs() < tolerance.angular()
}

/// Orthogonal curve detection has no agreed rule yet; always false.
pub fn are_curves_normal(g1: &Geometry, g2: &Geometry, _tolerance: &Tolerance) -> bool {
    debug!(a = %g1.label, b = %g2.label, "orthogonal curve constraints are not implemented");
    false
}

/// Parameter that should be pinned to its current value, if any.
///
/// Circles and arcs with a resolvable radius always qualify: nothing else in
/// the inferred set constrains it.
pub fn redundant_parameter(g: &Geometry) -> Option<(&'static str, f64)> {
    if g.kind != GeometryKind::Circle {
        return None;
    }
    g.parameter("radius").map(|r| ("radius", r))
}

/// Pairwise relations found in one batch, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relations {
    /// (point of g1, g2) for ordered pairs (g1, g2)
    pub points_along: Vec<(PointRef, EntityId)>,
    /// Unordered pairs, first element earlier in input order
    pub tangents: Vec<(EntityId, EntityId)>,
}

/// Evaluate point-along-curve over ordered pairs and tangency over unordered pairs.
pub fn classify_pairs(geometries: &[Geometry], tolerance: &Tolerance) -> Relations {
    let mut relations = Relations::default();

    for (i, g1) in geometries.iter().enumerate() {
        for (j, g2) in geometries.iter().enumerate() {
            if i == j {
                continue;
            }
            for p in &g1.points {
                if is_point_along_curve(p, g2, tolerance) {
                    debug!(point = %p.label, curve = %g2.label, "point along curve");
                    relations.points_along.push((p.reference, g2.id));
                }
            }
        }
    }

    for (i, g1) in geometries.iter().enumerate() {
        for g2 in &geometries[i + 1..] {
            if are_curves_tangent(g1, g2, tolerance) {
                debug!(a = %g1.label, b = %g2.label, "tangent curves");
                relations.tangents.push((g1.id, g2.id));
            } else if are_curves_normal(g1, g2, tolerance) {
                trace!(a = %g1.label, b = %g2.label, "normal curves skipped");
            }
        }
    }

    relations
}
