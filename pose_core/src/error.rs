//! Error types for pose_core.

use thiserror::Error;

/// Errors from pose data validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PoseCoreError {
    /// A pose slice did not have the expected 7 components.
    #[error("pose vector must have {expected} components, got {got}")]
    PoseLength {
        /// Expected component count.
        expected: usize,
        /// Actual component count.
        got: usize,
    },
}
