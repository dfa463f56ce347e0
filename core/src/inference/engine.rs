//! Batch pipeline: adapt → tolerance → classify/cluster → emit.
//!
//! Single-threaded and synchronous. A batch either completes or fails
//! outright on a planarity error; unsupported inputs only produce
//! diagnostics.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::adapter::{adapt, check_planarity, GeometrySource, RawCurve};
use super::classify::{classify_geometries, classify_pairs, Relations};
use super::cluster::cluster;
use super::config::InferenceConfig;
use super::emit::emit;
use super::error::{Diagnostic, InferenceError};
use super::tolerance::Tolerance;
use super::types::{Constraint, ConstraintSink, EquivalenceClass, Geometry, InferredSketch, Point};

/// Everything one batch produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceReport {
    pub tolerance: Tolerance,
    pub geometries: Vec<Geometry>,
    pub points: Vec<Point>,
    pub classes: Vec<EquivalenceClass>,
    pub relations: Relations,
    pub constraints: Vec<Constraint>,
    pub diagnostics: Vec<Diagnostic>,
}

impl InferenceReport {
    /// Hand the constraints to a solver-side sink, one at a time, in order.
    /// Returns the number of constraints delivered.
    pub fn apply_to<K: ConstraintSink + ?Sized>(&self, sink: &mut K) -> usize {
        for constraint in &self.constraints {
            sink.add_constraint(constraint.clone());
        }
        self.constraints.len()
    }

    pub fn into_sketch(self) -> InferredSketch {
        let mut sketch = InferredSketch::new(self.geometries);
        for constraint in self.constraints {
            sketch.add_constraint(constraint);
        }
        sketch
    }
}

#[derive(Debug, Clone, Default)]
pub struct InferenceEngine {
    config: InferenceConfig,
}

impl InferenceEngine {
    pub fn new(config: InferenceConfig) -> Result<Self, InferenceError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Run one batch over the host's curves, in input order.
    pub fn run<S: GeometrySource>(&self, sources: &[S]) -> Result<InferenceReport, InferenceError> {
        let curves: Vec<RawCurve> = sources.iter().map(|s| s.raw_curve()).collect();
        check_planarity(&curves, self.config.very_equal_epsilon)?;

        let mut geometries = Vec::new();
        let mut diagnostics = Vec::new();
        for (index, (source, curve)) in sources.iter().zip(&curves).enumerate() {
            match adapt(index, curve, source.label()) {
                Ok(adapted) => geometries.extend(adapted),
                Err(err) => {
                    warn!("Skipping input {}: {}", index, err);
                    diagnostics.push(Diagnostic::from(&err));
                }
            }
        }

        let tolerance = Tolerance::for_geometries(&geometries, &self.config);
        classify_geometries(&mut geometries, &tolerance);

        let points: Vec<Point> = geometries.iter().flat_map(|g| g.points.iter().cloned()).collect();
        let classes = cluster(&points, &tolerance);
        let relations = classify_pairs(&geometries, &tolerance);
        let constraints = emit(&geometries, &points, &classes, &relations, &self.config);

        info!(
            inputs = sources.len(),
            geometries = geometries.len(),
            points = points.len(),
            constraints = constraints.len(),
            skipped = diagnostics.len(),
            tolerance = tolerance.distance(),
            "constraint inference finished"
        );

        Ok(InferenceReport {
            tolerance,
            geometries,
            points,
            classes,
            relations,
            constraints,
            diagnostics,
        })
    }
}

/// Run one batch with the default configuration.
pub fn infer_constraints<S: GeometrySource>(sources: &[S]) -> Result<InferenceReport, InferenceError> {
    InferenceEngine::default().run(sources)
}
