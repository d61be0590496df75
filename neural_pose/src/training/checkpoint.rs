//! Checkpoint save/load for training state.
//!
//! Every epoch writes the latest checkpoint; strict improvements in
//! validation loss additionally copy it to the best-checkpoint artifact.

use std::fs;
use std::path::Path;

use burn::prelude::*;
use burn::record::{BinFileRecorder, FullPrecisionSettings};

use crate::error::Result;
use crate::nn::PoseNet;

/// File stem of the latest checkpoint, overwritten every epoch.
pub const LATEST_CHECKPOINT_STEM: &str = "checkpoint";

/// File stem of the best checkpoint, overwritten only on improvement.
pub const BEST_CHECKPOINT_STEM: &str = "model_best";

/// Checkpoint metadata stored as JSON next to the model record.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointMetadata {
    /// Next epoch to resume at (the last completed epoch + 1).
    pub epoch: usize,
    /// Best validation loss observed so far.
    pub best_loss: f32,
    /// Checkpoint version for compatibility.
    pub version: u32,
}

impl Default for CheckpointMetadata {
    fn default() -> Self {
        Self {
            epoch: 0,
            best_loss: f32::INFINITY,
            version: 1,
        }
    }
}

impl CheckpointMetadata {
    /// Create metadata from training state.
    pub fn new(epoch: usize, best_loss: f32) -> Self {
        Self {
            epoch,
            best_loss,
            ..Default::default()
        }
    }

    /// Parse metadata from a JSON string.
    pub fn from_json(json: &str) -> Self {
        // Simple JSON parsing without serde
        let mut metadata = Self::default();

        for line in json.lines() {
            let line = line.trim();
            if let Some((key, value)) = line.split_once(':') {
                let key = key.trim().trim_matches('"');
                let value = value.trim().trim_end_matches(',').trim_matches('"');

                match key {
                    "epoch" => {
                        metadata.epoch = value.parse().unwrap_or(0);
                    }
                    "best_loss" => {
                        metadata.best_loss = value.parse().unwrap_or(f32::INFINITY);
                    }
                    "version" => {
                        metadata.version = value.parse().unwrap_or(1);
                    }
                    _ => {}
                }
            }
        }

        metadata
    }

    /// Convert metadata to a JSON string.
    pub fn to_json(&self) -> String {
        format!(
            r#"{{
  "version": {},
  "epoch": {},
  "best_loss": {}
}}"#,
            self.version, self.epoch, self.best_loss
        )
    }
}

/// Persist a checkpoint to a directory.
///
/// Always writes `checkpoint.bin` (full model record) and
/// `checkpoint.json` (metadata). When `is_best`, copies both to
/// `model_best.bin`/`model_best.json`, so the best artifact is only ever
/// a byte-for-byte copy of a fully written latest checkpoint. Any write
/// failure is fatal; a partial checkpoint is never promoted to best.
pub fn save_checkpoint<B: Backend>(
    dir: &Path,
    model: &PoseNet<B>,
    metadata: &CheckpointMetadata,
    is_best: bool,
) -> Result<()> {
    fs::create_dir_all(dir)?;

    let recorder = BinFileRecorder::<FullPrecisionSettings>::new();
    model
        .clone()
        .save_file(dir.join(LATEST_CHECKPOINT_STEM), &recorder)?;
    fs::write(
        dir.join(format!("{LATEST_CHECKPOINT_STEM}.json")),
        metadata.to_json(),
    )?;

    if is_best {
        fs::copy(
            dir.join(format!("{LATEST_CHECKPOINT_STEM}.bin")),
            dir.join(format!("{BEST_CHECKPOINT_STEM}.bin")),
        )?;
        fs::copy(
            dir.join(format!("{LATEST_CHECKPOINT_STEM}.json")),
            dir.join(format!("{BEST_CHECKPOINT_STEM}.json")),
        )?;
        log::info!(
            "saved best checkpoint to {:?} (epoch {}, best loss {:.4})",
            dir,
            metadata.epoch,
            metadata.best_loss
        );
    } else {
        log::info!("saved checkpoint to {:?} (epoch {})", dir, metadata.epoch);
    }

    Ok(())
}

/// Load the latest checkpoint, restoring parameters into `model`.
pub fn load_checkpoint<B: Backend>(
    dir: &Path,
    model: PoseNet<B>,
    device: &B::Device,
) -> Result<(PoseNet<B>, CheckpointMetadata)> {
    load_named_checkpoint(dir, LATEST_CHECKPOINT_STEM, model, device)
}

/// Load the best checkpoint, restoring parameters into `model`.
pub fn load_best_checkpoint<B: Backend>(
    dir: &Path,
    model: PoseNet<B>,
    device: &B::Device,
) -> Result<(PoseNet<B>, CheckpointMetadata)> {
    load_named_checkpoint(dir, BEST_CHECKPOINT_STEM, model, device)
}

fn load_named_checkpoint<B: Backend>(
    dir: &Path,
    stem: &str,
    model: PoseNet<B>,
    device: &B::Device,
) -> Result<(PoseNet<B>, CheckpointMetadata)> {
    let json = fs::read_to_string(dir.join(format!("{stem}.json")))?;
    let metadata = CheckpointMetadata::from_json(&json);

    let recorder = BinFileRecorder::<FullPrecisionSettings>::new();
    let model = model.load_file(dir.join(stem), &recorder, device)?;

    log::info!(
        "loaded checkpoint from {:?} (epoch {}, best loss {:.4})",
        dir,
        metadata.epoch,
        metadata.best_loss
    );

    Ok((model, metadata))
}

/// Check whether a complete latest checkpoint exists at the given path.
pub fn checkpoint_exists(dir: &Path) -> bool {
    dir.join(format!("{LATEST_CHECKPOINT_STEM}.bin")).exists()
        && dir.join(format!("{LATEST_CHECKPOINT_STEM}.json")).exists()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_json_roundtrip() {
        let metadata = CheckpointMetadata::new(42, 3.25);

        let json = metadata.to_json();
        let parsed = CheckpointMetadata::from_json(&json);

        assert_eq!(parsed.epoch, 42);
        assert!((parsed.best_loss - 3.25).abs() < 1e-6);
        assert_eq!(parsed.version, 1);
    }

    #[test]
    fn test_metadata_default_is_fresh_run() {
        let metadata = CheckpointMetadata::default();
        assert_eq!(metadata.epoch, 0);
        assert!(metadata.best_loss.is_infinite());
    }

    #[test]
    fn test_metadata_ignores_unknown_keys() {
        let parsed = CheckpointMetadata::from_json(
            r#"{
  "version": 1,
  "epoch": 7,
  "optimizer": "adam",
  "best_loss": 1.5
}"#,
        );
        assert_eq!(parsed.epoch, 7);
        assert!((parsed.best_loss - 1.5).abs() < 1e-6);
    }
}
