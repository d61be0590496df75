//! Error types for neural_pose.

use burn::record::RecorderError;
use thiserror::Error;

/// Errors that can occur during pose regression training.
#[derive(Error, Debug)]
pub enum NeuralPoseError {
    /// Tensor shape mismatch between prediction and target layouts.
    #[error("tensor shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape.
        expected: Vec<usize>,
        /// Actual shape.
        got: Vec<usize>,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },

    /// An epoch phase was driven with zero batches.
    ///
    /// Running averages are undefined without at least one update, so an
    /// empty batch stream is rejected before any metric is read.
    #[error("{phase} phase received no batches")]
    EmptyEpoch {
        /// The phase that was starved ("train" or "validation").
        phase: &'static str,
    },

    /// Invalid or unreadable tensor data.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Checkpoint metadata I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Model record persistence failure.
    #[error("recorder error: {0}")]
    Recorder(#[from] RecorderError),
}

/// Result type for neural_pose operations.
pub type Result<T> = std::result::Result<T, NeuralPoseError>;
