use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::adapter::CurveKind;

#[derive(Debug, Error)]
pub enum InferenceError {
    /// Fatal: the whole batch is rejected before anything is emitted.
    #[error("All shapes must lie in one plane: input {index} has z = {found_z}, expected {expected_z}")]
    NonPlanar { index: usize, expected_z: f64, found_z: f64 },

    /// Recoverable: the input is skipped and reported as a diagnostic.
    #[error("Cannot convert curve of type {kind} (input {index})")]
    UnsupportedGeometry { index: usize, kind: CurveKind },

    /// Recoverable: the input carries too little data to build any geometry.
    #[error("Degenerate input {index}: {reason}")]
    Degenerate { index: usize, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration parse error: {0}")]
    Config(#[from] serde_json::Error),
}

impl InferenceError {
    /// Input index the error refers to, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            InferenceError::NonPlanar { index, .. }
            | InferenceError::UnsupportedGeometry { index, .. }
            | InferenceError::Degenerate { index, .. } => Some(*index),
            InferenceError::InvalidConfig(_) | InferenceError::Config(_) => None,
        }
    }
}

/// A skipped input, surfaced to the caller alongside the emitted constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub index: Option<usize>,
    pub message: String,
}

impl From<&InferenceError> for Diagnostic {
    fn from(err: &InferenceError) -> Self {
        Self { index: err.index(), message: err.to_string() }
    }
}
