//! Host curve adapter.
//!
//! Normalizes heterogeneous host curves into [`Geometry`] records in the
//! working plane. Pure: nothing here touches host state.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::InferenceError;
use super::types::{Geometry, GeometryKind, Parameter, Point, PointRef, PointRole};
use crate::geometry::{to_plane, Point3, Shape};
use crate::topo::EntityId;

/// A curve as described by the host, in 3D coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawCurve {
    Point { pos: [f64; 3] },
    LineSegment { start: [f64; 3], end: [f64; 3] },
    /// Wires, rectangles and polygons: one line segment per edge.
    Polyline {
        points: Vec<[f64; 3]>,
        #[serde(default)]
        closed: bool,
    },
    Circle { center: [f64; 3], radius: f64 },
    /// Counter-clockwise arc, angles in radians.
    Arc { center: [f64; 3], radius: f64, start_angle: f64, end_angle: f64 },
    Ellipse { center: [f64; 3], semi_major: f64, semi_minor: f64, rotation: f64 },
    BSpline { poles: Vec<[f64; 3]> },
    Bezier { poles: Vec<[f64; 3]> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveKind {
    Point,
    LineSegment,
    Polyline,
    Circle,
    Arc,
    Ellipse,
    BSpline,
    Bezier,
}

impl CurveKind {
    /// Lowercase name used in geometry labels.
    pub fn slug(&self) -> &'static str {
        match self {
            CurveKind::Point => "point",
            CurveKind::LineSegment => "segment",
            CurveKind::Polyline => "polyline",
            CurveKind::Circle => "circle",
            CurveKind::Arc => "arc",
            CurveKind::Ellipse => "ellipse",
            CurveKind::BSpline => "bspline",
            CurveKind::Bezier => "bezier",
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, CurveKind::Ellipse | CurveKind::BSpline | CurveKind::Bezier)
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CurveKind::Point => "Point",
            CurveKind::LineSegment => "LineSegment",
            CurveKind::Polyline => "Polyline",
            CurveKind::Circle => "Circle",
            CurveKind::Arc => "Arc",
            CurveKind::Ellipse => "Ellipse",
            CurveKind::BSpline => "BSpline",
            CurveKind::Bezier => "Bezier",
        };
        f.write_str(name)
    }
}

impl RawCurve {
    pub fn kind(&self) -> CurveKind {
        match self {
            RawCurve::Point { .. } => CurveKind::Point,
            RawCurve::LineSegment { .. } => CurveKind::LineSegment,
            RawCurve::Polyline { .. } => CurveKind::Polyline,
            RawCurve::Circle { .. } => CurveKind::Circle,
            RawCurve::Arc { .. } => CurveKind::Arc,
            RawCurve::Ellipse { .. } => CurveKind::Ellipse,
            RawCurve::BSpline { .. } => CurveKind::BSpline,
            RawCurve::Bezier { .. } => CurveKind::Bezier,
        }
    }

    /// Defining points, used for the planarity check.
    pub fn anchors(&self) -> Vec<Point3> {
        match self {
            RawCurve::Point { pos } => vec![Point3::from(*pos)],
            RawCurve::LineSegment { start, end } => vec![Point3::from(*start), Point3::from(*end)],
            RawCurve::Polyline { points, .. } => points.iter().map(|p| Point3::from(*p)).collect(),
            RawCurve::Circle { center, .. }
            | RawCurve::Arc { center, .. }
            | RawCurve::Ellipse { center, .. } => vec![Point3::from(*center)],
            RawCurve::BSpline { poles } | RawCurve::Bezier { poles } => {
                poles.iter().map(|p| Point3::from(*p)).collect()
            }
        }
    }
}

/// Capability the engine consumes from the host: a curve description and,
/// optionally, a host-side name.
pub trait GeometrySource {
    fn raw_curve(&self) -> RawCurve;

    fn label(&self) -> Option<String> {
        None
    }
}

impl GeometrySource for RawCurve {
    fn raw_curve(&self) -> RawCurve {
        self.clone()
    }
}

impl<T: GeometrySource + ?Sized> GeometrySource for &T {
    fn raw_curve(&self) -> RawCurve {
        (**self).raw_curve()
    }

    fn label(&self) -> Option<String> {
        (**self).label()
    }
}

/// Check that every anchor of every input shares the z of the first anchor.
/// Unsupported inputs take part too: the check runs before adaptation.
/// Returns the plane height, or `None` for an input without anchors.
pub fn check_planarity(curves: &[RawCurve], epsilon: f64) -> Result<Option<f64>, InferenceError> {
    let mut plane_z: Option<f64> = None;

    for (index, curve) in curves.iter().enumerate() {
        for anchor in curve.anchors() {
            match plane_z {
                None => plane_z = Some(anchor.z),
                Some(z) if (z - anchor.z).abs() < epsilon => {}
                Some(z) => {
                    return Err(InferenceError::NonPlanar { index, expected_z: z, found_z: anchor.z });
                }
            }
        }
    }

    Ok(plane_z)
}

/// Convert one host curve into geometries.
///
/// Polylines yield one geometry per edge; everything else yields exactly one.
/// Ellipses, B-splines and Bezier curves fail with `UnsupportedGeometry`.
pub fn adapt(index: usize, curve: &RawCurve, label: Option<String>) -> Result<Vec<Geometry>, InferenceError> {
    let kind = curve.kind();
    let base = label.unwrap_or_else(|| format!("{}-{}", kind.slug(), index));

    match curve {
        RawCurve::Point { pos } => {
            let pos = to_plane(&Point3::from(*pos));
            let mut geo = new_geometry(index, 0, base, GeometryKind::Point, Shape::Vertex { pos });
            push_point(&mut geo, PointRole::Position, pos);
            Ok(vec![geo])
        }
        RawCurve::LineSegment { start, end } => {
            let start = to_plane(&Point3::from(*start));
            let end = to_plane(&Point3::from(*end));
            Ok(vec![line_segment(index, 0, base, start, end)])
        }
        RawCurve::Polyline { points, closed } => {
            if points.len() < 2 {
                return Err(InferenceError::Degenerate {
                    index,
                    reason: format!("polyline needs at least 2 points, got {}", points.len()),
                });
            }
            let planar: Vec<[f64; 2]> = points.iter().map(|p| to_plane(&Point3::from(*p))).collect();
            let mut edges: Vec<([f64; 2], [f64; 2])> = planar.windows(2).map(|w| (w[0], w[1])).collect();
            if *closed && planar.len() > 2 {
                edges.push((planar[planar.len() - 1], planar[0]));
            }
            Ok(edges
                .into_iter()
                .enumerate()
                .map(|(edge, (start, end))| {
                    line_segment(index, edge, format!("{}/edge-{}", base, edge), start, end)
                })
                .collect())
        }
        RawCurve::Circle { center, radius } => {
            let center = to_plane(&Point3::from(*center));
            let shape = Shape::Circle { center, radius: *radius };
            Ok(vec![circular(index, base, shape, *radius)])
        }
        RawCurve::Arc { center, radius, start_angle, end_angle } => {
            let center = to_plane(&Point3::from(*center));
            let shape = Shape::Arc {
                center,
                radius: *radius,
                start_angle: *start_angle,
                end_angle: *end_angle,
            };
            Ok(vec![circular(index, base, shape, *radius)])
        }
        RawCurve::Ellipse { .. } | RawCurve::BSpline { .. } | RawCurve::Bezier { .. } => {
            Err(InferenceError::UnsupportedGeometry { index, kind })
        }
    }
}

fn new_geometry(index: usize, edge: usize, label: String, kind: GeometryKind, shape: Shape) -> Geometry {
    Geometry {
        id: EntityId::new_deterministic(&format!("curve-{}/edge-{}", index, edge)),
        label,
        source_index: index,
        kind,
        shape,
        points: Vec::new(),
        parameters: Vec::new(),
        orientation: Default::default(),
    }
}

fn push_point(geo: &mut Geometry, role: PointRole, position: [f64; 2]) {
    geo.points.push(Point {
        reference: PointRef { entity: geo.id, role },
        label: format!("{}:{}", geo.label, role),
        position,
    });
}

fn line_segment(index: usize, edge: usize, label: String, start: [f64; 2], end: [f64; 2]) -> Geometry {
    let mut geo = new_geometry(index, edge, label, GeometryKind::LineSegment, Shape::Segment { start, end });
    push_point(&mut geo, PointRole::Start, start);
    push_point(&mut geo, PointRole::End, end);
    geo
}

/// Circles and arcs expose no clusterable points, only their radius.
fn circular(index: usize, label: String, shape: Shape, radius: f64) -> Geometry {
    let mut geo = new_geometry(index, 0, label, GeometryKind::Circle, shape);
    geo.parameters.push(Parameter {
        name: "radius".to_string(),
        value: (radius.is_finite() && radius > 0.0).then_some(radius),
    });
    geo
}
