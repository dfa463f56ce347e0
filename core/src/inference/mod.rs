//! Geometry-to-constraint inference.
//!
//! Given already drawn 2D curves, classify the relationships between them
//! and emit a minimal, non-redundant constraint set that reproduces the
//! current configuration for an external solver.

pub mod types;
pub mod error;
pub mod config;
pub mod tolerance;
pub mod adapter;
pub mod cluster;
pub mod classify;
pub mod emit;
pub mod engine;

pub use adapter::{CurveKind, GeometrySource, RawCurve};
pub use config::InferenceConfig;
pub use engine::{infer_constraints, InferenceEngine, InferenceReport};
pub use error::{Diagnostic, InferenceError};
pub use tolerance::Tolerance;
pub use types::{
    Constraint, ConstraintSink, EquivalenceClass, Geometry, GeometryKind, InferredSketch, Orientation, Point,
    PointRef, PointRole,
};

#[cfg(test)]
mod tests_support;





#[cfg(test)]
mod tests_emission;
