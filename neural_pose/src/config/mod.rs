//! Configuration types for networks and training.

mod network;
mod training;

pub use network::{ConvBackboneConfig, ImageClassifierConfig, PoseNetConfig};
pub use training::TrainingConfig;
