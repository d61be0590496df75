//! # pose_core
//!
//! Pure mathematical building blocks for camera pose regression.
//!
//! This crate carries the framework-free pieces of the pose-regression
//! stack: the 7-component pose data model, the running-average metric
//! tracker used by the training loops, the stepped learning-rate schedule,
//! and the double-cover angular distance between raw rotation 4-vectors.
//! The tensor-facing side lives in `neural_pose`, which builds on top of
//! these types.
//!
//! ## Modules
//!
//! - [`types`]: `Pose` and the 7-vector layout (translation 0..3, rotation 3..7)
//! - [`meter`]: `AverageMeter` running mean/count tracker
//! - [`schedule`]: `StepDecay` learning-rate schedule
//! - [`quat`]: angular distance between rotation 4-vectors, in degrees
//! - [`error`]: error types

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod meter;
pub mod quat;
pub mod schedule;
pub mod types;

pub use error::PoseCoreError;
pub use meter::AverageMeter;
pub use quat::{angular_distance_deg, MIN_ROTATION_NORM};
pub use schedule::StepDecay;
pub use types::{Pose, POSE_DIM, ROTATION_DIM, TRANSLATION_DIM};
