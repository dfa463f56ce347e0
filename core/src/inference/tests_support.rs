use super::adapter::{adapt, RawCurve};
use super::config::InferenceConfig;
use super::tolerance::Tolerance;
use super::types::Geometry;

pub fn segment(x1: f64, y1: f64, x2: f64, y2: f64) -> RawCurve {
    RawCurve::LineSegment { start: [x1, y1, 0.0], end: [x2, y2, 0.0] }
}

pub fn point(x: f64, y: f64) -> RawCurve {
    RawCurve::Point { pos: [x, y, 0.0] }
}

pub fn circle(x: f64, y: f64, radius: f64) -> RawCurve {
    RawCurve::Circle { center: [x, y, 0.0], radius }
}

/// Closed axis-aligned rectangle as four separate segments.
pub fn rectangle(w: f64, h: f64) -> Vec<RawCurve> {
    vec![
        segment(0.0, 0.0, w, 0.0),
        segment(w, 0.0, w, h),
        segment(w, h, 0.0, h),
        segment(0.0, h, 0.0, 0.0),
    ]
}

/// Adapt curves the way the engine does, panicking on unsupported input.
pub fn adapt_all(curves: &[RawCurve]) -> Vec<Geometry> {
    curves
        .iter()
        .enumerate()
        .flat_map(|(i, c)| adapt(i, c, None).expect("test curves must be supported"))
        .collect()
}

pub fn tolerance_for(geometries: &[Geometry]) -> Tolerance {
    Tolerance::for_geometries(geometries, &InferenceConfig::default())
}
