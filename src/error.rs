//! Error types for the GKDE defense

use thiserror::Error;

/// All possible errors in the GKDE filtering pipeline
#[derive(Error, Debug)]
pub enum GkdeError {
    /// Task identifier not present in the registry
    #[error("Unknown learning task: '{0}' (expected mnist, fashion, or cifar10)")]
    UnknownTask(String),

    /// A whitelisted parameter name is absent from a model's parameter map
    #[error("Whitelisted parameter '{0}' missing from model")]
    MissingParameter(String),

    /// Global and local flat vectors differ in length for the same whitelist
    #[error("Vector dimension mismatch: global has {expected}, local has {actual}")]
    DimensionMismatch {
        /// Length of the global model's flat vector
        expected: usize,
        /// Length of the offending local model's flat vector
        actual: usize,
    },

    /// Cosine similarity is undefined for a zero-magnitude vector
    #[error("Zero-magnitude parameter vector: cosine similarity undefined")]
    ZeroMagnitudeVector,

    /// No local models were available for the requested round
    #[error("No local models available for round {0}")]
    EmptyRound(usize),

    /// Model store collaborator failed to produce a model
    #[error("Model store error: {0}")]
    Storage(String),

    /// Array shape mismatch
    #[error("Array shape error: {0}")]
    ShapeError(String),
}

impl From<ndarray::ShapeError> for GkdeError {
    fn from(e: ndarray::ShapeError) -> Self {
        GkdeError::ShapeError(e.to_string())
    }
}
