//! Convolutional feature extractor and donor classifier.

use burn::module::Module;
use burn::nn::conv::{Conv2d, Conv2dConfig};
use burn::nn::pool::{AdaptiveAvgPool2d, AdaptiveAvgPool2dConfig, MaxPool2d, MaxPool2dConfig};
use burn::nn::{BatchNorm, BatchNormConfig, Linear, LinearConfig, PaddingConfig2d, Relu};
use burn::prelude::*;

use crate::config::{ConvBackboneConfig, ImageClassifierConfig};

/// One downsampling stage: two 3x3 convolutions, the first with stride 2.
#[derive(Module, Debug)]
struct ConvStage<B: Backend> {
    conv1: Conv2d<B>,
    norm1: BatchNorm<B, 2>,
    conv2: Conv2d<B>,
    norm2: BatchNorm<B, 2>,
    activation: Relu,
}

impl<B: Backend> ConvStage<B> {
    fn new(in_channels: usize, out_channels: usize, device: &B::Device) -> Self {
        let conv1 = Conv2dConfig::new([in_channels, out_channels], [3, 3])
            .with_stride([2, 2])
            .with_padding(PaddingConfig2d::Explicit(1, 1))
            .with_bias(false)
            .init(device);
        let conv2 = Conv2dConfig::new([out_channels, out_channels], [3, 3])
            .with_padding(PaddingConfig2d::Explicit(1, 1))
            .with_bias(false)
            .init(device);

        Self {
            conv1,
            norm1: BatchNormConfig::new(out_channels).init(device),
            conv2,
            norm2: BatchNormConfig::new(out_channels).init(device),
            activation: Relu::new(),
        }
    }

    fn forward(&self, input: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.activation.forward(self.norm1.forward(self.conv1.forward(input)));
        self.activation.forward(self.norm2.forward(self.conv2.forward(x)))
    }
}

/// Convolutional image feature extractor.
///
/// Architecture: 7x7 stride-2 stem with batch norm and max pooling,
/// followed by stride-2 conv stages and an adaptive average pool down to
/// a 1x1 spatial map. The output keeps its 4-D shape
/// `[batch, feature_dim, 1, 1]`; consumers flatten it themselves, so the
/// extractor's structure stays opaque to them.
///
/// Pretrained weights are an external concern: load a saved record into a
/// backbone (or a whole [`ImageClassifier`]) with Burn's recorder before
/// handing it to the pose network.
#[derive(Module, Debug)]
pub struct ConvBackbone<B: Backend> {
    stem: Conv2d<B>,
    stem_norm: BatchNorm<B, 2>,
    stem_pool: MaxPool2d,
    stages: Vec<ConvStage<B>>,
    avg_pool: AdaptiveAvgPool2d,
    activation: Relu,
    feature_dim: usize,
}

impl<B: Backend> ConvBackbone<B> {
    /// Create a backbone from configuration with freshly initialized weights.
    pub fn new(config: &ConvBackboneConfig, device: &B::Device) -> Self {
        let stem_out = config.stage_channels[0];
        let stem = Conv2dConfig::new([config.in_channels, stem_out], [7, 7])
            .with_stride([2, 2])
            .with_padding(PaddingConfig2d::Explicit(3, 3))
            .with_bias(false)
            .init(device);
        let stem_pool = MaxPool2dConfig::new([3, 3])
            .with_strides([2, 2])
            .with_padding(PaddingConfig2d::Explicit(1, 1))
            .init();

        let mut stages = Vec::new();
        let mut in_channels = stem_out;
        for &out_channels in &config.stage_channels[1..] {
            stages.push(ConvStage::new(in_channels, out_channels, device));
            in_channels = out_channels;
        }

        Self {
            stem,
            stem_norm: BatchNormConfig::new(stem_out).init(device),
            stem_pool,
            stages,
            avg_pool: AdaptiveAvgPool2dConfig::new([1, 1]).init(),
            activation: Relu::new(),
            feature_dim: in_channels,
        }
    }

    /// Forward pass.
    ///
    /// Input: `[batch, channels, height, width]` images.
    /// Output: `[batch, feature_dim, 1, 1]` pooled feature map.
    pub fn forward(&self, images: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.stem.forward(images);
        let x = self.activation.forward(self.stem_norm.forward(x));
        let mut x = self.stem_pool.forward(x);

        for stage in &self.stages {
            x = stage.forward(x);
        }

        self.avg_pool.forward(x)
    }

    /// Width of the flattened feature vector.
    pub fn feature_dim(&self) -> usize {
        self.feature_dim
    }
}

/// An image classifier: backbone plus a final classification layer.
///
/// This is the donor architecture for pose regression. The pose network
/// consumes everything except the last layer, so the classifier exposes
/// [`ImageClassifier::into_backbone`] to hand over its feature extractor.
#[derive(Module, Debug)]
pub struct ImageClassifier<B: Backend> {
    backbone: ConvBackbone<B>,
    fc: Linear<B>,
}

impl<B: Backend> ImageClassifier<B> {
    /// Create a classifier from configuration.
    pub fn new(config: &ImageClassifierConfig, device: &B::Device) -> Self {
        let backbone = ConvBackbone::new(&config.backbone, device);
        let fc = LinearConfig::new(backbone.feature_dim(), config.num_classes).init(device);
        Self { backbone, fc }
    }

    /// Forward pass producing class logits `[batch, num_classes]`.
    pub fn forward(&self, images: Tensor<B, 4>) -> Tensor<B, 2> {
        let features = self.backbone.forward(images);
        let [batch, _, _, _] = features.dims();
        let flat = features.reshape([batch as i32, -1]);
        self.fc.forward(flat)
    }

    /// Discard the classification layer and keep the feature extractor.
    pub fn into_backbone(self) -> ConvBackbone<B> {
        self.backbone
    }
}
