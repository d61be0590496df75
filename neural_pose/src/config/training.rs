//! Training configuration.

use burn::config::Config;
use pose_core::StepDecay;

/// Configuration for the pose regression trainer.
#[derive(Config, Debug)]
pub struct TrainingConfig {
    /// Total number of epochs to run.
    #[config(default = 160)]
    pub epochs: usize,

    /// Base learning rate before decay.
    #[config(default = 1e-4)]
    pub learning_rate: f64,

    /// Epoch interval at which the learning rate is decayed by 10x.
    #[config(default = 80)]
    pub lr_decay_epochs: usize,

    /// Weight of the rotation loss relative to the translation loss.
    ///
    /// Translation errors are measured in scene units while rotation
    /// components are unit-ish, so the rotation term needs a large weight
    /// to contribute comparably. 500 is the reference value; tune per
    /// scene scale.
    #[config(default = 500.0)]
    pub beta: f32,

    /// L2 weight decay applied by the optimizer.
    #[config(default = 2e-4)]
    pub weight_decay: f32,

    /// Batch size, consumed by the data collaborator when building batches.
    #[config(default = 75)]
    pub batch_size: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingConfig {
    /// The learning-rate schedule implied by this configuration.
    pub fn lr_schedule(&self) -> StepDecay {
        StepDecay::new(self.learning_rate, self.lr_decay_epochs)
    }

    /// Learning rate for the given epoch.
    pub fn learning_rate_at(&self, epoch: usize) -> f64 {
        self.lr_schedule().rate(epoch)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.epochs == 0 {
            return Err("epochs must be positive".to_string());
        }
        if self.learning_rate <= 0.0 {
            return Err("learning_rate must be positive".to_string());
        }
        if self.beta < 0.0 {
            return Err("beta must be non-negative".to_string());
        }
        if self.batch_size == 0 {
            return Err("batch_size must be positive".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_training_config() {
        let config = TrainingConfig::default();
        assert_eq!(config.epochs, 160);
        assert!((config.beta - 500.0).abs() < 1e-6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_learning_rate_schedule() {
        let config = TrainingConfig::default();
        assert!((config.learning_rate_at(0) - 1e-4).abs() < 1e-12);
        assert!((config.learning_rate_at(80) - 1e-5).abs() < 1e-12);
        assert!((config.learning_rate_at(160) - 1e-6).abs() < 1e-13);
    }

    #[test]
    fn test_builder_pattern() {
        let config = TrainingConfig::default().with_beta(250.0).with_epochs(10);
        assert_eq!(config.epochs, 10);
        assert!((config.beta - 250.0).abs() < 1e-6);
    }

    #[test]
    fn test_validate_rejects_zero_epochs() {
        let config = TrainingConfig::default().with_epochs(0);
        assert!(config.validate().is_err());
    }
}
