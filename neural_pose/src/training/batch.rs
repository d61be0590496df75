//! Training batches of images and ground-truth poses.

use burn::prelude::*;
use pose_core::{POSE_DIM, TRANSLATION_DIM};

use crate::error::{NeuralPoseError, Result};

/// A batch of images with their ground-truth poses.
///
/// The pose tensor follows the canonical 7-column layout: columns 0..3
/// are the translation, columns 3..7 the rotation 4-vector. Producing
/// batches (loading, augmentation, train/validation splitting) is the
/// data collaborator's job; both tensors must already live on the
/// training device.
#[derive(Debug, Clone)]
pub struct PoseBatch<B: Backend> {
    /// Images: `[batch, channels, height, width]`.
    pub images: Tensor<B, 4>,
    /// Ground-truth poses: `[batch, 7]`.
    pub poses: Tensor<B, 2>,
}

impl<B: Backend> PoseBatch<B> {
    /// Create a batch, validating the pose layout.
    ///
    /// Fails with [`NeuralPoseError::ShapeMismatch`] if the pose tensor
    /// does not have 7 columns or its batch dimension disagrees with the
    /// images.
    pub fn new(images: Tensor<B, 4>, poses: Tensor<B, 2>) -> Result<Self> {
        let batch = images.dims()[0];
        let pose_dims = poses.dims();
        if pose_dims != [batch, POSE_DIM] {
            return Err(NeuralPoseError::ShapeMismatch {
                expected: vec![batch, POSE_DIM],
                got: pose_dims.to_vec(),
            });
        }
        Ok(Self { images, poses })
    }

    /// Number of samples in the batch.
    pub fn batch_size(&self) -> usize {
        self.images.dims()[0]
    }

    /// Ground-truth translations: `[batch, 3]`.
    pub fn translation(&self) -> Tensor<B, 2> {
        let batch = self.batch_size();
        self.poses.clone().slice([0..batch, 0..TRANSLATION_DIM])
    }

    /// Ground-truth rotations: `[batch, 4]`.
    pub fn rotation(&self) -> Tensor<B, 2> {
        let batch = self.batch_size();
        self.poses.clone().slice([0..batch, TRANSLATION_DIM..POSE_DIM])
    }

    /// Device the batch lives on.
    pub fn device(&self) -> B::Device {
        self.images.device()
    }
}
