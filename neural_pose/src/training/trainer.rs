//! Pose regression trainer.
//!
//! Drives the epoch loop: adjust learning rate, train, validate, compare
//! against the best validation loss, checkpoint. Phases run strictly in
//! sequence on a single logical thread; parameters are only mutated by
//! the training phase and only read during validation.

use std::path::Path;

use burn::module::AutodiffModule;
use burn::optim::{GradientsParams, Optimizer};
use burn::prelude::*;
use burn::tensor::backend::AutodiffBackend;
use burn::tensor::ElementConversion;

use crate::config::TrainingConfig;
use crate::error::{NeuralPoseError, Result};
use crate::loss::{rotation_error_deg, PoseLoss};
use crate::nn::PoseNet;
use crate::training::checkpoint::{load_checkpoint, save_checkpoint, CheckpointMetadata};
use crate::training::metrics::{TrainEpochStats, ValidationStats};
use crate::training::PoseBatch;

fn scalar<B: Backend>(value: Tensor<B, 1>) -> f32 {
    value.into_scalar().elem()
}

/// Mutable training progress owned by the trainer.
///
/// The original formulation keeps these as ambient top-level variables;
/// here they are explicit state threaded through the epoch loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainState {
    /// Next epoch to run.
    pub epoch: usize,
    /// Best validation loss seen across all completed epochs.
    pub best_loss: f32,
}

impl Default for TrainState {
    fn default() -> Self {
        Self {
            epoch: 0,
            best_loss: f32::INFINITY,
        }
    }
}

/// Summary of a completed [`PoseTrainer::fit`] run.
#[derive(Debug, Clone)]
pub struct TrainReport {
    /// Number of epochs executed by this run.
    pub epochs_run: usize,
    /// Best validation loss across the whole run.
    pub best_loss: f32,
    /// Validation stats of the final epoch, if any epoch ran.
    pub final_validation: Option<ValidationStats>,
}

/// Pose regression trainer.
///
/// Owns the model and the training state; the optimizer is supplied by
/// the caller (any [`Optimizer`] over the model works, Adam with weight
/// decay being the reference choice).
#[derive(Debug)]
pub struct PoseTrainer<B: AutodiffBackend> {
    model: PoseNet<B>,
    config: TrainingConfig,
    state: TrainState,
}

impl<B: AutodiffBackend> PoseTrainer<B> {
    /// Create a trainer from a configuration and a freshly built model.
    pub fn new(config: TrainingConfig, model: PoseNet<B>) -> Result<Self> {
        config
            .validate()
            .map_err(|message| NeuralPoseError::InvalidConfig { message })?;
        Ok(Self {
            model,
            config,
            state: TrainState::default(),
        })
    }

    /// The training configuration.
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Current training state.
    pub fn state(&self) -> TrainState {
        self.state
    }

    /// Borrow the model.
    pub fn model(&self) -> &PoseNet<B> {
        &self.model
    }

    /// Take the model out of the trainer.
    pub fn into_model(self) -> PoseNet<B> {
        self.model
    }

    /// Run one training epoch over the given batches.
    ///
    /// Per batch: forward, combined loss, backward, one optimizer step at
    /// the epoch's scheduled learning rate. Gradients are rebuilt from
    /// each batch's backward pass, never accumulated across batches.
    /// Metrics are weighted by batch size.
    pub fn train_epoch<O>(
        &mut self,
        optim: &mut O,
        batches: &[PoseBatch<B>],
        epoch: usize,
    ) -> Result<TrainEpochStats>
    where
        O: Optimizer<PoseNet<B>, B>,
    {
        if batches.is_empty() {
            return Err(NeuralPoseError::EmptyEpoch { phase: "train" });
        }

        let lr = self.config.learning_rate_at(epoch);
        let loss_fn = PoseLoss::new(self.config.beta);
        let mut stats = TrainEpochStats::new();

        for (i, batch) in batches.iter().enumerate() {
            let batch_size = batch.batch_size();

            let (pred_translation, pred_rotation) = self.model.forward(batch.images.clone());
            let (total, trans, rot) = loss_fn.combined_loss(
                pred_translation,
                pred_rotation,
                batch.translation(),
                batch.rotation(),
            );

            let grads = GradientsParams::from_grads(total.backward(), &self.model);
            self.model = optim.step(lr, self.model.clone(), grads);

            stats.record(scalar(total), scalar(trans), scalar(rot), batch_size);
            log::debug!(
                "epoch {} [{}/{}] loss {:.4} ({:.4}) trans {:.4} ({:.4}) rot {:.4} ({:.4})",
                epoch,
                i + 1,
                batches.len(),
                stats.loss.value,
                stats.loss.average,
                stats.trans_loss.value,
                stats.trans_loss.average,
                stats.rot_loss.value,
                stats.rot_loss.average,
            );
        }

        Ok(stats)
    }

    /// Run one validation pass.
    ///
    /// The model is switched to the inner (non-autodiff) backend, which
    /// disables dropout and gradient tracking; no parameters change.
    /// Returns the epoch's running averages, including the rotation
    /// angular error diagnostic.
    pub fn validate(&self, batches: &[PoseBatch<B::InnerBackend>]) -> Result<ValidationStats> {
        if batches.is_empty() {
            return Err(NeuralPoseError::EmptyEpoch {
                phase: "validation",
            });
        }

        let model = self.model.valid();
        let loss_fn = PoseLoss::new(self.config.beta);
        let mut stats = TrainEpochStats::new();
        let mut error_meter = pose_core::AverageMeter::new();

        for batch in batches {
            let batch_size = batch.batch_size();

            let (pred_translation, pred_rotation) = model.forward(batch.images.clone());
            let (total, trans, rot) = loss_fn.combined_loss(
                pred_translation,
                pred_rotation.clone(),
                batch.translation(),
                batch.rotation(),
            );
            let error = rotation_error_deg(pred_rotation, batch.rotation())?;

            stats.record(scalar(total), scalar(trans), scalar(rot), batch_size);
            error_meter.update(error, batch_size);
        }

        log::info!(
            "validation: loss ({:.4}) trans ({:.4}) rot ({:.4}) rot error ({:.4} deg)",
            stats.loss.average,
            stats.trans_loss.average,
            stats.rot_loss.average,
            error_meter.average,
        );

        Ok(ValidationStats {
            loss: stats.loss.average,
            trans_loss: stats.trans_loss.average,
            rot_loss: stats.rot_loss.average,
            rot_error_deg: error_meter.average,
        })
    }

    /// Run the full epoch loop from the current state to the configured
    /// epoch count.
    ///
    /// Each epoch: schedule the learning rate, train, validate, compare
    /// the validation loss against the best so far (strict improvement
    /// only), then persist the latest checkpoint and, on improvement, the
    /// best artifact. There is no early stopping; a checkpoint write
    /// failure aborts the run.
    pub fn fit<O>(
        &mut self,
        optim: &mut O,
        train_batches: &[PoseBatch<B>],
        val_batches: &[PoseBatch<B::InnerBackend>],
        checkpoint_dir: &Path,
    ) -> Result<TrainReport>
    where
        O: Optimizer<PoseNet<B>, B>,
    {
        let start_epoch = self.state.epoch;
        let mut final_validation = None;

        for epoch in start_epoch..self.config.epochs {
            let lr = self.config.learning_rate_at(epoch);
            let train_stats = self.train_epoch(optim, train_batches, epoch)?;
            let validation = self.validate(val_batches)?;

            let is_best = validation.loss < self.state.best_loss;
            if is_best {
                self.state.best_loss = validation.loss;
            }
            self.state.epoch = epoch + 1;

            let metadata = CheckpointMetadata::new(self.state.epoch, self.state.best_loss);
            save_checkpoint(checkpoint_dir, &self.model, &metadata, is_best)?;

            log::info!(
                "epoch {}/{}: lr {:.1e} train loss {:.4} val loss {:.4}{}",
                epoch + 1,
                self.config.epochs,
                lr,
                train_stats.loss.average,
                validation.loss,
                if is_best { " (best)" } else { "" },
            );
            final_validation = Some(validation);
        }

        Ok(TrainReport {
            epochs_run: self.state.epoch - start_epoch,
            best_loss: self.state.best_loss,
            final_validation,
        })
    }

    /// Resume from the latest checkpoint in `dir`, restoring model
    /// parameters and training state.
    pub fn resume(&mut self, dir: &Path, device: &B::Device) -> Result<()> {
        let (model, metadata) = load_checkpoint(dir, self.model.clone(), device)?;
        self.model = model;
        self.state = TrainState {
            epoch: metadata.epoch,
            best_loss: metadata.best_loss,
        };
        Ok(())
    }
}
