//! Training loop, validation, metrics, and checkpointing.

mod batch;
mod checkpoint;
mod metrics;
mod trainer;

pub use batch::PoseBatch;
pub use checkpoint::{
    checkpoint_exists, load_best_checkpoint, load_checkpoint, save_checkpoint, CheckpointMetadata,
    BEST_CHECKPOINT_STEM, LATEST_CHECKPOINT_STEM,
};
pub use metrics::{TrainEpochStats, ValidationStats};
pub use trainer::{PoseTrainer, TrainReport, TrainState};
