use crate::geometry::Shape;
use crate::topo::EntityId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named point slot within a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PointRole {
    /// The single point of a Point geometry.
    Position,
    Start,
    End,
}

impl PointRole {
    pub fn name(&self) -> &'static str {
        match self {
            PointRole::Position => "position",
            PointRole::Start => "start",
            PointRole::End => "end",
        }
    }
}

impl fmt::Display for PointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stable reference to a point owned by a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointRef {
    pub entity: EntityId,
    pub role: PointRole,
}

/// A resolved point: a view into its owning geometry, never owned on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub reference: PointRef,
    /// Human readable form, e.g. `segment-3:start`.
    pub label: String,
    pub position: [f64; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
    LineSegment,
    /// Full circles and arcs.
    Circle,
}

/// Axis alignment of a line segment. Exactly one value per geometry, so a
/// segment can never be both horizontal and vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    None,
    Horizontal,
    Vertical,
}

/// A named scalar of a geometry. `value` is `None` when the host could not
/// resolve it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: Option<f64>,
}

/// A classified curve primitive in the working plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub id: EntityId,
    /// Human readable name, e.g. `segment-3` or `polyline-1/edge-2`.
    pub label: String,
    /// Position of the originating curve in the input batch.
    pub source_index: usize,
    pub kind: GeometryKind,
    pub shape: Shape,
    /// Ordered by role: `Start` before `End`.
    pub points: Vec<Point>,
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub orientation: Orientation,
}

impl Geometry {
    pub fn point(&self, role: PointRole) -> Option<&Point> {
        self.points.iter().find(|p| p.reference.role == role)
    }

    /// Resolved value of a named parameter, if the host provided one.
    pub fn parameter(&self, name: &str) -> Option<f64> {
        self.parameters.iter().find(|p| p.name == name).and_then(|p| p.value)
    }

    pub fn is_horizontal(&self) -> bool {
        self.orientation == Orientation::Horizontal
    }

    pub fn is_vertical(&self) -> bool {
        self.orientation == Orientation::Vertical
    }
}

/// Maximal set of mutually coincident points (size ≥ 2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquivalenceClass {
    /// Members in input order.
    pub points: Vec<PointRef>,
}

impl EquivalenceClass {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, point: &PointRef) -> bool {
        self.points.contains(point)
    }
}

/// Abstract constraint handed to the external solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Constraint {
    /// Anchor a point at its current position.
    PinPoint { point: PointRef, position: [f64; 2] },
    Coincident { points: Vec<PointRef> },
    Horizontal { entity: EntityId },
    Vertical { entity: EntityId },
    Tangent { entities: [EntityId; 2] },
    /// A point lying on a curve away from the curve's endpoints.
    PointAlongCurve { point: PointRef, curve: EntityId },
    /// Fix a named parameter (e.g. `radius`) to its current value.
    FixedParameter { entity: EntityId, name: String, value: f64 },
    /// Signed X delta `points[1].x - points[0].x`.
    XDistance { points: [PointRef; 2], value: f64 },
    /// Signed Y delta `points[1].y - points[0].y`.
    YDistance { points: [PointRef; 2], value: f64 },
}

impl Constraint {
    pub fn tag(&self) -> &'static str {
        match self {
            Constraint::PinPoint { .. } => "PinPoint",
            Constraint::Coincident { .. } => "Coincident",
            Constraint::Horizontal { .. } => "Horizontal",
            Constraint::Vertical { .. } => "Vertical",
            Constraint::Tangent { .. } => "Tangent",
            Constraint::PointAlongCurve { .. } => "PointAlongCurve",
            Constraint::FixedParameter { .. } => "FixedParameter",
            Constraint::XDistance { .. } => "XDistance",
            Constraint::YDistance { .. } => "YDistance",
        }
    }
}

/// Receiver of emitted constraints, one at a time, in emission order.
pub trait ConstraintSink {
    fn add_constraint(&mut self, constraint: Constraint);
}

impl ConstraintSink for Vec<Constraint> {
    fn add_constraint(&mut self, constraint: Constraint) {
        self.push(constraint);
    }
}

/// Geometries plus the constraints inferred for them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InferredSketch {
    pub geometries: Vec<Geometry>,
    pub constraints: Vec<Constraint>,
}

impl InferredSketch {
    pub fn new(geometries: Vec<Geometry>) -> Self {
        Self { geometries, constraints: Vec::new() }
    }

    pub fn geometry(&self, id: EntityId) -> Option<&Geometry> {
        self.geometries.iter().find(|g| g.id == id)
    }

    /// Number of constraints carrying the given tag.
    pub fn count(&self, tag: &str) -> usize {
        self.constraints.iter().filter(|c| c.tag() == tag).count()
    }
}

impl ConstraintSink for InferredSketch {
    fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }
}
