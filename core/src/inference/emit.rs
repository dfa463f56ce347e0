//! Constraint emission.
//!
//! Turns classifier output into an ordered, deduplicated constraint list.
//! The order is part of the contract: pin, coincidence, orientation,
//! point-along-curve, tangency, then per-geometry extras.

use std::collections::HashSet;

use tracing::trace;

use super::classify::{redundant_parameter, Relations};
use super::config::InferenceConfig;
use super::types::{Constraint, EquivalenceClass, Geometry, GeometryKind, Orientation, Point, PointRef, PointRole};
use crate::topo::EntityId;

/// Structural identity of a constraint, ignoring its numeric payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ConstraintKey {
    Pin(PointRef),
    Coincident(Vec<PointRef>),
    Horizontal(EntityId),
    Vertical(EntityId),
    Tangent(EntityId, EntityId),
    PointAlongCurve(PointRef, EntityId),
    FixedParameter(EntityId, String),
    XDistance(PointRef, PointRef),
    YDistance(PointRef, PointRef),
}

impl ConstraintKey {
    fn of(constraint: &Constraint) -> Self {
        match constraint {
            Constraint::PinPoint { point, .. } => ConstraintKey::Pin(*point),
            Constraint::Coincident { points } => {
                let mut sorted = points.clone();
                sorted.sort();
                ConstraintKey::Coincident(sorted)
            }
            Constraint::Horizontal { entity } => ConstraintKey::Horizontal(*entity),
            Constraint::Vertical { entity } => ConstraintKey::Vertical(*entity),
            Constraint::Tangent { entities: [a, b] } => ConstraintKey::Tangent(*a.min(b), *a.max(b)),
            Constraint::PointAlongCurve { point, curve } => ConstraintKey::PointAlongCurve(*point, *curve),
            Constraint::FixedParameter { entity, name, .. } => ConstraintKey::FixedParameter(*entity, name.clone()),
            Constraint::XDistance { points: [a, b], .. } => ConstraintKey::XDistance(*a, *b),
            Constraint::YDistance { points: [a, b], .. } => ConstraintKey::YDistance(*a, *b),
        }
    }
}

/// Accumulates constraints, dropping structural duplicates.
#[derive(Debug, Default)]
struct Emitter {
    seen: HashSet<ConstraintKey>,
    out: Vec<Constraint>,
}

impl Emitter {
    fn push(&mut self, constraint: Constraint) {
        if self.seen.insert(ConstraintKey::of(&constraint)) {
            self.out.push(constraint);
        } else {
            trace!(tag = constraint.tag(), "duplicate constraint dropped");
        }
    }
}

/// Emit constraints for one batch.
///
/// `geometries` must already carry their orientation, and `points` must be
/// in input order (the first one is the pinned anchor).
pub fn emit(
    geometries: &[Geometry],
    points: &[Point],
    classes: &[EquivalenceClass],
    relations: &Relations,
    config: &InferenceConfig,
) -> Vec<Constraint> {
    let mut emitter = Emitter::default();

    // 1. Anchor
    if config.pin_first_point {
        if let Some(first) = points.first() {
            emitter.push(Constraint::PinPoint { point: first.reference, position: first.position });
        }
    }

    // 2. Coincidence
    for class in classes.iter().filter(|c| c.len() >= 2) {
        emitter.push(Constraint::Coincident { points: class.points.clone() });
    }

    // 3. Orientation: all horizontals, then the verticals
    for g in geometries.iter().filter(|g| g.is_horizontal()) {
        emitter.push(Constraint::Horizontal { entity: g.id });
    }
    for g in geometries.iter().filter(|g| g.is_vertical()) {
        emitter.push(Constraint::Vertical { entity: g.id });
    }

    // 4. Point along curve
    for (point, curve) in &relations.points_along {
        emitter.push(Constraint::PointAlongCurve { point: *point, curve: *curve });
    }

    // 5. Tangency
    for (a, b) in &relations.tangents {
        emitter.push(Constraint::Tangent { entities: [*a, *b] });
    }

    // 6. Per-geometry extras
    for g in geometries {
        match g.kind {
            GeometryKind::Circle if config.emit_radius => {
                if let Some((name, value)) = redundant_parameter(g) {
                    emitter.push(Constraint::FixedParameter { entity: g.id, name: name.to_string(), value });
                }
            }
            GeometryKind::LineSegment if config.emit_segment_dimensions => {
                if let Some(c) = segment_dimension(g) {
                    emitter.push(c);
                }
            }
            _ => {}
        }
    }

    emitter.out
}

/// Axis distance for an axis-aligned segment.
fn segment_dimension(g: &Geometry) -> Option<Constraint> {
    let start = g.point(PointRole::Start)?;
    let end = g.point(PointRole::End)?;
    let points = [start.reference, end.reference];

    match g.orientation {
        Orientation::Horizontal => Some(Constraint::XDistance {
            points,
            value: end.position[0] - start.position[0],
        }),
        Orientation::Vertical => Some(Constraint::YDistance {
            points,
            value: end.position[1] - start.position[1],
        }),
        Orientation::None => {
            // TODO: emit a length constraint once the solver exposes one
            trace!(segment = %g.label, "no dimension for oblique segment");
            None
        }
    }
}
