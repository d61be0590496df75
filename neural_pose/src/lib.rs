//! # neural_pose
//!
//! Camera relocalization with Burn: regress a 6-DoF camera pose from a
//! single RGB image.
//!
//! The network composes a convolutional feature extractor with a shared
//! latent regressor and two output heads, one for the translation
//! 3-vector and one for the rotation 4-vector. Training minimizes a
//! weighted sum of the two Euclidean losses, with the rotation term
//! scaled by a large `beta` so it contributes comparably to the
//! scene-scale translation error.
//!
//! ## Quick Start
//!
//! ```ignore
//! use neural_pose::{
//!     config::{ConvBackboneConfig, PoseNetConfig, TrainingConfig},
//!     nn::{ConvBackbone, PoseNet},
//!     training::PoseTrainer,
//! };
//! use burn::backend::{Autodiff, NdArray};
//! use burn::optim::{AdamConfig, decay::WeightDecayConfig};
//!
//! type MyBackend = Autodiff<NdArray>;
//!
//! let device = Default::default();
//! let config = TrainingConfig::new();
//!
//! let backbone = ConvBackbone::<MyBackend>::new(&ConvBackboneConfig::new(), &device);
//! let model = PoseNet::new(&PoseNetConfig::new(), backbone, &device);
//!
//! let mut optim = AdamConfig::new()
//!     .with_weight_decay(Some(WeightDecayConfig::new(config.weight_decay)))
//!     .init();
//! let mut trainer = PoseTrainer::new(config, model)?;
//!
//! let report = trainer.fit(&mut optim, &train_batches, &val_batches, checkpoint_dir)?;
//! println!("best validation loss: {}", report.best_loss);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! pose_core (pure math: poses, meters, schedules)
//!     │
//!     ▼
//! neural_pose
//!     ├── config     network + training configuration
//!     ├── nn         backbone, classifier donor, PoseNet
//!     ├── loss       weighted pose loss, rotation error metric
//!     └── training   trainer, batches, metrics, checkpoints
//! ```
//!
//! ## Feature Flags
//!
//! - `wgpu`: GPU acceleration via WebGPU (CPU ndarray backend is always
//!   available)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod loss;
pub mod nn;
pub mod training;

// Re-export key types for convenience
pub use config::{ConvBackboneConfig, ImageClassifierConfig, PoseNetConfig, TrainingConfig};
pub use error::{NeuralPoseError, Result};
pub use loss::PoseLoss;
pub use nn::{ConvBackbone, ImageClassifier, PoseNet};
pub use training::{PoseBatch, PoseTrainer, TrainReport};

// Re-export from pose_core for convenience
pub use pose_core::{AverageMeter, Pose, StepDecay};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{
        ConvBackboneConfig, ImageClassifierConfig, PoseNetConfig, TrainingConfig,
    };
    pub use crate::error::{NeuralPoseError, Result};
    pub use crate::loss::{rotation_error_deg, PoseLoss};
    pub use crate::nn::{ConvBackbone, ImageClassifier, PoseNet};
    pub use crate::training::{
        checkpoint_exists, load_best_checkpoint, load_checkpoint, save_checkpoint,
        CheckpointMetadata, PoseBatch, PoseTrainer, TrainEpochStats, TrainReport, TrainState,
        ValidationStats,
    };

    pub use pose_core::{AverageMeter, Pose, StepDecay};
}
