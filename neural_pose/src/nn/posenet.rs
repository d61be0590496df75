//! Pose regression network.

use burn::module::{Module, Param};
use burn::nn::{Dropout, DropoutConfig, Linear, Relu};
use burn::prelude::*;
use burn::tensor::Distribution;

use crate::config::PoseNetConfig;
use crate::nn::{ConvBackbone, ImageClassifier};

/// Weight standard deviation for the shared regressor and rotation head.
const INIT_STD: f64 = 0.01;

/// Per-output standard deviations for the translation head.
///
/// Outputs 0 and 1 (horizontal axes) start with std 0.5, output 2 (the
/// vertical axis, which has a smaller expected scale) with std 0.1. This
/// asymmetric table is a deliberate, hand-tuned choice that materially
/// affects convergence; keep it as a table rather than a single scalar.
pub const TRANSLATION_HEAD_STD: [f64; 3] = [0.5, 0.5, 0.1];

/// Linear layer with `N(0, std)` weights and zero bias.
fn normal_linear<B: Backend>(
    d_input: usize,
    d_output: usize,
    std: f64,
    device: &B::Device,
) -> Linear<B> {
    let weight = Tensor::random([d_input, d_output], Distribution::Normal(0.0, std), device);
    Linear {
        weight: Param::from_tensor(weight),
        bias: Some(Param::from_tensor(Tensor::zeros([d_output], device))),
    }
}

/// Translation head with per-output init stds and zero bias.
///
/// Burn stores linear weights as `[d_input, d_output]`, so PyTorch's
/// per-output-row table becomes per-column here: column j is drawn with
/// `TRANSLATION_HEAD_STD[j]`.
fn translation_head<B: Backend>(d_input: usize, device: &B::Device) -> Linear<B> {
    let columns: Vec<Tensor<B, 2>> = TRANSLATION_HEAD_STD
        .iter()
        .map(|&std| Tensor::random([d_input, 1], Distribution::Normal(0.0, std), device))
        .collect();
    let weight = Tensor::cat(columns, 1);

    Linear {
        weight: Param::from_tensor(weight),
        bias: Some(Param::from_tensor(Tensor::zeros(
            [TRANSLATION_HEAD_STD.len()],
            device,
        ))),
    }
}

/// Camera pose regression network.
///
/// Composes a feature extractor (every layer of a donor classifier except
/// its classification head) with a shared latent regressor and two
/// independent output heads:
///
/// ```text
/// images ──► backbone ──► flatten ──► Linear(feature_dim, 2048) ─► ReLU ─► Dropout
///                                                                      │
///                                       ┌──────────────────────────────┴───┐
///                                       ▼                                  ▼
///                              Linear(2048, 3)                    Linear(2048, 4)
///                               translation                          rotation
/// ```
///
/// The backbone's structure is consumed as-is, never modified; all of its
/// parameters keep training alongside the new layers. Head outputs are raw
/// linear values (no activation); the rotation 4-vector is only normalized
/// inside the evaluation error metric.
#[derive(Module, Debug)]
pub struct PoseNet<B: Backend> {
    features: ConvBackbone<B>,
    regressor: Linear<B>,
    activation: Relu,
    dropout: Dropout,
    trans_head: Linear<B>,
    rot_head: Linear<B>,
}

impl<B: Backend> PoseNet<B> {
    /// Build a pose network on top of an existing feature extractor.
    ///
    /// The regressor and rotation head weights are drawn from
    /// `N(0, 0.01)`, the translation head from the per-output table
    /// [`TRANSLATION_HEAD_STD`]; all biases start at zero.
    pub fn new(config: &PoseNetConfig, features: ConvBackbone<B>, device: &B::Device) -> Self {
        let feature_dim = features.feature_dim();
        let regressor = normal_linear(feature_dim, config.latent_dim, INIT_STD, device);
        let trans_head = translation_head(config.latent_dim, device);
        let rot_head = normal_linear(config.latent_dim, 4, INIT_STD, device);

        Self {
            features,
            regressor,
            activation: Relu::new(),
            dropout: DropoutConfig::new(config.dropout).init(),
            trans_head,
            rot_head,
        }
    }

    /// Build a pose network from a donor classifier, discarding its
    /// classification layer.
    pub fn from_classifier(
        config: &PoseNetConfig,
        classifier: ImageClassifier<B>,
        device: &B::Device,
    ) -> Self {
        Self::new(config, classifier.into_backbone(), device)
    }

    /// Forward pass.
    ///
    /// Input: `[batch, channels, height, width]` images.
    /// Output: `(translation [batch, 3], rotation [batch, 4])`.
    pub fn forward(&self, images: Tensor<B, 4>) -> (Tensor<B, 2>, Tensor<B, 2>) {
        let features = self.features.forward(images);
        let flat = features.flatten::<2>(1, 3);

        let latent = self.regressor.forward(flat);
        let latent = self.dropout.forward(self.activation.forward(latent));

        let translation = self.trans_head.forward(latent.clone());
        let rotation = self.rot_head.forward(latent);

        (translation, rotation)
    }

    /// Width of the backbone's feature vector.
    pub fn feature_dim(&self) -> usize {
        self.features.feature_dim()
    }
}
