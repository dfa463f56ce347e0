//! Scale-aware tolerance policy.
//!
//! One `Tolerance` is derived per batch, from the full input set, before any
//! classification runs. Every comparison in that run shares it.

use serde::{Deserialize, Serialize};

use super::config::{InferenceConfig, DEFAULT_MIN_SCALE, DEFAULT_RELATIVE_TOLERANCE, DEFAULT_VERY_EQUAL_EPSILON};
use super::types::Geometry;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    scale: f64,
    relative_fraction: f64,
    very_equal_epsilon: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            scale: DEFAULT_MIN_SCALE,
            relative_fraction: DEFAULT_RELATIVE_TOLERANCE,
            very_equal_epsilon: DEFAULT_VERY_EQUAL_EPSILON,
        }
    }
}

impl Tolerance {
    /// Tolerance for a given working scale, floored at the default minimum scale.
    pub fn new(scale: f64, relative_fraction: f64) -> Self {
        Self { relative_fraction, ..Self::default() }.with_scale(scale, DEFAULT_MIN_SCALE)
    }

    /// Derive the working scale from the largest geometry extent in the batch.
    pub fn for_geometries(geometries: &[Geometry], config: &InferenceConfig) -> Self {
        let largest = geometries
            .iter()
            .map(|g| g.shape.extent())
            .filter(|e| e.is_finite())
            .fold(0.0_f64, f64::max);

        Self {
            scale: DEFAULT_MIN_SCALE,
            relative_fraction: config.relative_tolerance,
            very_equal_epsilon: config.very_equal_epsilon,
        }
        .with_scale(largest, config.min_scale)
    }

    /// Replace the working scale, never going below `floor`.
    pub fn with_scale(mut self, value: f64, floor: f64) -> Self {
        self.scale = if value.is_finite() { value.max(floor) } else { floor };
        self
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Working distance epsilon: scale × relative fraction.
    pub fn distance(&self) -> f64 {
        self.scale * self.relative_fraction
    }

    /// Bound on |sin| of the angle between two unit directions.
    /// Unitless, so it does not loosen as drawings grow.
    pub fn angular(&self) -> f64 {
        self.relative_fraction
    }

    pub fn is_zero(&self, v: f64) -> bool {
        v.abs() < self.distance()
    }

    pub fn are_equal(&self, a: f64, b: f64) -> bool {
        self.is_zero(a - b)
    }

    /// Scale-independent comparison for exact-plane checks.
    pub fn are_very_equal(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.very_equal_epsilon
    }

    /// Axis-wise coincidence: both x and y must agree within tolerance.
    /// Not a Euclidean test; the diagonal reach is √2 × the distance epsilon.
    pub fn are_coincident(&self, p1: [f64; 2], p2: [f64; 2]) -> bool {
        self.are_equal(p1[0], p2[0]) && self.are_equal(p1[1], p2[1])
    }
}
