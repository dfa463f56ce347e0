//! Inference configuration.
//!
//! Loaded from JSON by hosts; every field is optional and falls back to
//! the defaults below.

use serde::{Deserialize, Serialize};

use super::error::InferenceError;

/// Fraction of the working scale used as the distance tolerance.
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 0.03;
/// Scale-independent epsilon for exact-equality checks such as coplanarity.
pub const DEFAULT_VERY_EQUAL_EPSILON: f64 = 1e-6;
/// Floor for the working scale, so point-only inputs still get a usable tolerance.
pub const DEFAULT_MIN_SCALE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Distance tolerance = working scale × this fraction
    pub relative_tolerance: f64,
    /// Absolute epsilon for planarity checks
    pub very_equal_epsilon: f64,
    /// Lower bound of the working scale
    pub min_scale: f64,
    /// Anchor the first point so the solver has a reference
    pub pin_first_point: bool,
    /// Emit X/Y distance constraints for axis-aligned segments
    pub emit_segment_dimensions: bool,
    /// Fix circle radii to their current values
    pub emit_radius: bool,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            relative_tolerance: DEFAULT_RELATIVE_TOLERANCE,
            very_equal_epsilon: DEFAULT_VERY_EQUAL_EPSILON,
            min_scale: DEFAULT_MIN_SCALE,
            pin_first_point: true,
            emit_segment_dimensions: true,
            emit_radius: true,
        }
    }
}

impl InferenceConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, InferenceError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), InferenceError> {
        let positive = |name: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(InferenceError::InvalidConfig(format!(
                    "{} must be a positive finite number, got {}",
                    name, value
                )))
            }
        };
        positive("relative_tolerance", self.relative_tolerance)?;
        positive("very_equal_epsilon", self.very_equal_epsilon)?;
        positive("min_scale", self.min_scale)?;
        Ok(())
    }
}
