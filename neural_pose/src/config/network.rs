//! Network configuration types.

use burn::config::Config;

/// Configuration for the convolutional feature extractor.
#[derive(Config, Debug)]
pub struct ConvBackboneConfig {
    /// Input image channels.
    #[config(default = 3)]
    pub in_channels: usize,

    /// Output channels per downsampling stage. The last entry is the
    /// backbone's feature dimension (512 for the reference backbone).
    #[config(default = "vec![64, 128, 256, 512]")]
    pub stage_channels: Vec<usize>,
}

impl Default for ConvBackboneConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvBackboneConfig {
    /// Feature dimension produced by the backbone.
    pub fn feature_dim(&self) -> usize {
        self.stage_channels.last().copied().unwrap_or(0)
    }

    /// A narrow backbone for fast tests.
    pub fn tiny() -> Self {
        Self::new().with_stage_channels(vec![4, 8])
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.in_channels == 0 {
            return Err("in_channels must be positive".to_string());
        }
        if self.stage_channels.is_empty() {
            return Err("stage_channels must not be empty".to_string());
        }
        if self.stage_channels.contains(&0) {
            return Err("stage_channels must all be positive".to_string());
        }
        Ok(())
    }
}

/// Configuration for an image classifier (backbone + classification head).
///
/// The classifier itself is only a donor: `PoseNet` keeps its backbone and
/// discards the classification head.
#[derive(Config, Debug)]
pub struct ImageClassifierConfig {
    /// Backbone configuration.
    pub backbone: ConvBackboneConfig,

    /// Number of output classes for the (discarded) classification head.
    #[config(default = 1000)]
    pub num_classes: usize,
}

impl Default for ImageClassifierConfig {
    fn default() -> Self {
        Self::new(ConvBackboneConfig::default())
    }
}

/// Configuration for the pose regression network.
#[derive(Config, Debug)]
pub struct PoseNetConfig {
    /// Width of the shared latent pose embedding.
    #[config(default = 2048)]
    pub latent_dim: usize,

    /// Dropout probability applied after the shared regressor.
    #[config(default = 0.5)]
    pub dropout: f64,
}

impl Default for PoseNetConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PoseNetConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.latent_dim == 0 {
            return Err("latent_dim must be positive".to_string());
        }
        if !(0.0..1.0).contains(&self.dropout) {
            return Err("dropout must be in [0, 1)".to_string());
        }
        Ok(())
    }
}
