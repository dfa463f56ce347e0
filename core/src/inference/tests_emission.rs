use super::adapter::RawCurve;
use super::classify::Relations;
use super::config::InferenceConfig;
use super::emit::emit;
use super::engine::{infer_constraints, InferenceEngine};
use super::error::InferenceError;
use super::tests_support::*;
use super::types::{Constraint, ConstraintSink, InferredSketch, PointRole};

fn count(constraints: &[Constraint], tag: &str) -> usize {
    constraints.iter().filter(|c| c.tag() == tag).count()
}

#[test]
fn test_rectangle_round_trip() {
    let report = infer_constraints(&rectangle(10.0, 6.0)).unwrap();
    let c = &report.constraints;

    assert_eq!(count(c, "PinPoint"), 1);
    assert_eq!(count(c, "Coincident"), 4);
    assert_eq!(count(c, "Horizontal"), 2);
    assert_eq!(count(c, "Vertical"), 2);
    assert_eq!(count(c, "Tangent"), 0);
    assert_eq!(count(c, "PointAlongCurve"), 0);
    assert_eq!(count(c, "XDistance"), 2);
    assert_eq!(count(c, "YDistance"), 2);
    assert!(report.diagnostics.is_empty());
}

#[test]
fn test_rectangle_with_duplicate_corner_points() {
    let mut curves = rectangle(10.0, 10.0);
    curves.push(point(0.0, 0.0));
    curves.push(point(10.0, 10.05));
    let report = infer_constraints(&curves).unwrap();
    let c = &report.constraints;

    assert_eq!(count(c, "Coincident"), 4);
    assert_eq!(count(c, "Horizontal"), 2);
    assert_eq!(count(c, "Vertical"), 2);
    assert_eq!(count(c, "PinPoint"), 1);
    assert_eq!(count(c, "PointAlongCurve"), 0);

    let sizes: Vec<usize> = report.classes.iter().map(|k| k.len()).collect();
    assert_eq!(sizes, vec![3, 2, 3, 2]);
}

#[test]
fn test_single_circle_pins_radius_only() {
    let report = infer_constraints(&[circle(2.0, 3.0, 5.0)]).unwrap();
    assert_eq!(report.constraints.len(), 1);
    match &report.constraints[0] {
        Constraint::FixedParameter { entity, name, value } => {
            assert_eq!(*entity, report.geometries[0].id);
            assert_eq!(name, "radius");
            assert_eq!(*value, 5.0);
        }
        other => panic!("expected FixedParameter, got {:?}", other),
    }
}

#[test]
fn test_colinear_segments_share_endpoint() {
    let report = infer_constraints(&[segment(0.0, 0.0, 10.0, 0.0), segment(10.0, 0.0, 20.0, 0.0)]).unwrap();
    let c = &report.constraints;
    assert_eq!(count(c, "Coincident"), 1);
    assert_eq!(count(c, "Tangent"), 0);
    assert_eq!(count(c, "Horizontal"), 2);

    if let Constraint::Coincident { points } = &c[1] {
        assert_eq!(points[0].role, PointRole::End);
        assert_eq!(points[1].role, PointRole::Start);
    } else {
        panic!("second constraint should be the coincidence");
    }
}

#[test]
fn test_coincident_point_is_not_also_along_curve() {
    let report = infer_constraints(&[segment(0.0, 0.0, 20.0, 20.0), segment(19.2, 19.2, 19.2, 5.0)]).unwrap();
    assert_eq!(count(&report.constraints, "Coincident"), 1);
    assert_eq!(count(&report.constraints, "PointAlongCurve"), 0);
}

#[test]
fn test_first_point_is_pinned() {
    let report = infer_constraints(&[segment(1.0, 2.0, 7.0, 9.0)]).unwrap();
    match &report.constraints[0] {
        Constraint::PinPoint { point, position } => {
            assert_eq!(*point, report.points[0].reference);
            assert_eq!(*position, [1.0, 2.0]);
        }
        other => panic!("expected PinPoint first, got {:?}", other),
    }
    // Oblique segment: no orientation, no dimension
    assert_eq!(report.constraints.len(), 1);
}

#[test]
fn test_pin_can_be_disabled() {
    let engine = InferenceEngine::new(InferenceConfig { pin_first_point: false, ..Default::default() }).unwrap();
    let report = engine.run(&[segment(0.0, 0.0, 10.0, 0.0)]).unwrap();
    assert_eq!(count(&report.constraints, "PinPoint"), 0);
    assert_eq!(count(&report.constraints, "Horizontal"), 1);
}

#[test]
fn test_extras_can_be_disabled() {
    let config = InferenceConfig { emit_segment_dimensions: false, emit_radius: false, ..Default::default() };
    let engine = InferenceEngine::new(config).unwrap();
    let report = engine.run(&[segment(0.0, 0.0, 10.0, 0.0), circle(30.0, 30.0, 2.0)]).unwrap();
    assert_eq!(count(&report.constraints, "XDistance"), 0);
    assert_eq!(count(&report.constraints, "FixedParameter"), 0);
}

#[test]
fn test_segment_dimensions_are_signed() {
    let report = infer_constraints(&[segment(10.0, 0.0, 0.0, 0.0), segment(0.0, 0.0, 0.0, 4.0)]).unwrap();
    let dims: Vec<&Constraint> = report
        .constraints
        .iter()
        .filter(|c| matches!(c, Constraint::XDistance { .. } | Constraint::YDistance { .. }))
        .collect();
    assert_eq!(dims.len(), 2);
    assert!(matches!(dims[0], Constraint::XDistance { value, .. } if *value == -10.0));
    assert!(matches!(dims[1], Constraint::YDistance { value, .. } if *value == 4.0));
}

#[test]
fn test_emission_order_follows_steps() {
    let curves = vec![
        segment(0.0, 0.0, 10.0, 0.0),
        segment(10.0, 0.0, 10.0, 10.0),
        circle(5.0, 5.0, 5.0),
        point(5.0, 0.0),
    ];
    let report = infer_constraints(&curves).unwrap();

    let rank = |c: &Constraint| match c {
        Constraint::PinPoint { .. } => 0,
        Constraint::Coincident { .. } => 1,
        Constraint::Horizontal { .. } => 2,
        Constraint::Vertical { .. } => 3,
        Constraint::PointAlongCurve { .. } => 4,
        Constraint::Tangent { .. } => 5,
        Constraint::FixedParameter { .. } | Constraint::XDistance { .. } | Constraint::YDistance { .. } => 6,
    };
    let ranks: Vec<u8> = report.constraints.iter().map(rank).collect();
    assert!(ranks.windows(2).all(|w| w[0] <= w[1]), "out of order: {:?}", ranks);

    // The circle is inscribed against both segments; the loose point sits
    // on the bottom segment and on the circle
    assert_eq!(count(&report.constraints, "PointAlongCurve"), 2);
    assert_eq!(count(&report.constraints, "Tangent"), 2);
}

#[test]
fn test_duplicate_relations_emitted_once() {
    let geos = adapt_all(&[circle(0.0, 0.0, 5.0), segment(-10.0, 5.0, 10.0, 5.0)]);
    let points: Vec<_> = geos.iter().flat_map(|g| g.points.iter().cloned()).collect();
    let relations = Relations {
        points_along: vec![],
        tangents: vec![(geos[0].id, geos[1].id), (geos[1].id, geos[0].id)],
    };
    let constraints = emit(&geos, &points, &[], &relations, &InferenceConfig::default());
    assert_eq!(count(&constraints, "Tangent"), 1);
}

#[test]
fn test_unsupported_inputs_are_skipped() {
    let curves = vec![
        segment(0.0, 0.0, 10.0, 0.0),
        RawCurve::Ellipse { center: [0.0, 0.0, 0.0], semi_major: 4.0, semi_minor: 2.0, rotation: 0.0 },
        segment(10.0, 0.0, 10.0, 10.0),
    ];
    let report = infer_constraints(&curves).unwrap();
    assert_eq!(report.geometries.len(), 2);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].index, Some(1));
    assert!(report.diagnostics[0].message.contains("Ellipse"));
    assert_eq!(count(&report.constraints, "Coincident"), 1);
}

#[test]
fn test_non_planar_batch_fails() {
    let curves = vec![
        segment(0.0, 0.0, 10.0, 0.0),
        RawCurve::Circle { center: [0.0, 0.0, 1.0], radius: 2.0 },
    ];
    let err = infer_constraints(&curves).unwrap_err();
    assert!(matches!(err, InferenceError::NonPlanar { index: 1, .. }));
}

#[test]
fn test_empty_batch() {
    let report = infer_constraints::<RawCurve>(&[]).unwrap();
    assert!(report.constraints.is_empty());
    assert!(report.geometries.is_empty());
}

#[test]
fn test_idempotent_emission() {
    let mut curves = rectangle(12.0, 8.0);
    curves.push(circle(6.0, 12.0, 4.0));
    curves.push(point(3.0, 0.0));

    let first = infer_constraints(&curves).unwrap();
    let second = infer_constraints(&curves).unwrap();
    let a = serde_json::to_string(&first.constraints).unwrap();
    let b = serde_json::to_string(&second.constraints).unwrap();
    assert_eq!(a, b);

    // Re-emitting from the same classified state is also stable
    let again = emit(&first.geometries, &first.points, &first.classes, &first.relations, &InferenceConfig::default());
    assert_eq!(serde_json::to_string(&again).unwrap(), a);
}

#[test]
fn test_report_feeds_sinks() {
    let report = infer_constraints(&rectangle(4.0, 4.0)).unwrap();

    let mut solver_side: Vec<Constraint> = Vec::new();
    let delivered = report.apply_to(&mut solver_side);
    assert_eq!(delivered, report.constraints.len());
    assert_eq!(solver_side, report.constraints);

    let expected = report.constraints.len();
    let sketch: InferredSketch = report.into_sketch();
    assert_eq!(sketch.geometries.len(), 4);
    assert_eq!(sketch.constraints.len(), expected);
    assert_eq!(sketch.count("Horizontal"), 2);
    assert!(sketch.geometry(sketch.geometries[2].id).is_some());
}

#[test]
fn test_sketch_is_a_sink() {
    let mut sketch = InferredSketch::default();
    let geos = adapt_all(&[segment(0.0, 0.0, 1.0, 0.0)]);
    sketch.add_constraint(Constraint::Horizontal { entity: geos[0].id });
    assert_eq!(sketch.count("Horizontal"), 1);
}

struct HostLine {
    name: &'static str,
    start: [f64; 2],
    end: [f64; 2],
}

impl super::adapter::GeometrySource for HostLine {
    fn raw_curve(&self) -> RawCurve {
        RawCurve::LineSegment {
            start: [self.start[0], self.start[1], 0.0],
            end: [self.end[0], self.end[1], 0.0],
        }
    }

    fn label(&self) -> Option<String> {
        Some(self.name.to_string())
    }
}

#[test]
fn test_host_sources_keep_their_labels() {
    let host = vec![
        HostLine { name: "Line", start: [0.0, 0.0], end: [6.0, 0.0] },
        HostLine { name: "Line001", start: [6.0, 0.0], end: [6.0, 6.0] },
    ];
    let report = infer_constraints(&host).unwrap();
    assert_eq!(report.geometries[1].label, "Line001");
    assert_eq!(report.points[1].label, "Line:end");
    assert_eq!(count(&report.constraints, "Coincident"), 1);
}
