//! Pose loss functions.

use burn::prelude::*;
use pose_core::angular_distance_deg;

use crate::error::{NeuralPoseError, Result};

/// Epsilon added inside the Euclidean-norm square root.
///
/// Keeps the gradient defined (and exactly zero) when prediction equals
/// target; without it the norm's derivative at zero is NaN. The loss floor
/// at equality is `sqrt(NORM_EPS) = 1e-6`.
pub const NORM_EPS: f64 = 1e-12;

/// Pose loss calculator.
///
/// Both heads share the same formula: the per-sample Euclidean norm of
/// (prediction - target), averaged over the batch. The combined training
/// objective weights the rotation term by `beta` to compensate for the
/// magnitude mismatch between translations (scene units) and rotation
/// components (unit-ish).
#[derive(Debug, Clone, Copy)]
pub struct PoseLoss {
    beta: f32,
}

impl PoseLoss {
    /// Create a loss calculator with the given rotation weight.
    pub fn new(beta: f32) -> Self {
        Self { beta }
    }

    /// The rotation loss weight.
    pub fn beta(&self) -> f32 {
        self.beta
    }

    /// Batch-mean Euclidean distance between prediction and target.
    ///
    /// Input: two `[batch, dim]` tensors. Output: scalar loss.
    pub fn euclidean_loss<B: Backend>(
        &self,
        prediction: Tensor<B, 2>,
        target: Tensor<B, 2>,
    ) -> Tensor<B, 1> {
        let diff = prediction - target;
        let squared = diff.clone() * diff;
        let norm = squared.sum_dim(1).add_scalar(NORM_EPS).sqrt();
        norm.mean()
    }

    /// Combined training loss.
    ///
    /// Returns `(total, translation, weighted rotation)` where
    /// `total = translation + beta * rotation`. The rotation component is
    /// reported beta-scaled, matching how it enters the objective.
    pub fn combined_loss<B: Backend>(
        &self,
        pred_translation: Tensor<B, 2>,
        pred_rotation: Tensor<B, 2>,
        gt_translation: Tensor<B, 2>,
        gt_rotation: Tensor<B, 2>,
    ) -> (Tensor<B, 1>, Tensor<B, 1>, Tensor<B, 1>) {
        let translation = self.euclidean_loss(pred_translation, gt_translation);
        let rotation = self
            .euclidean_loss(pred_rotation, gt_rotation)
            .mul_scalar(self.beta);
        let total = translation.clone() + rotation.clone();

        (total, translation, rotation)
    }
}

/// Batch-mean angular error between predicted and target rotation
/// 4-vectors, in degrees.
///
/// Validation-only diagnostic; no gradients flow through it, so the
/// arccos is evaluated host-side per sample via
/// [`pose_core::angular_distance_deg`] (which also carries the
/// degenerate-norm clamp policy).
pub fn rotation_error_deg<B: Backend>(
    prediction: Tensor<B, 2>,
    target: Tensor<B, 2>,
) -> Result<f32> {
    let pred_dims = prediction.dims();
    let target_dims = target.dims();
    if pred_dims != target_dims || pred_dims[1] != 4 {
        return Err(NeuralPoseError::ShapeMismatch {
            expected: vec![pred_dims[0], 4],
            got: target_dims.to_vec(),
        });
    }
    let batch = pred_dims[0];
    if batch == 0 {
        return Err(NeuralPoseError::EmptyEpoch {
            phase: "validation",
        });
    }

    let pred: Vec<f32> = prediction
        .into_data()
        .to_vec()
        .map_err(|e| NeuralPoseError::InvalidData(format!("{e:?}")))?;
    let gt: Vec<f32> = target
        .into_data()
        .to_vec()
        .map_err(|e| NeuralPoseError::InvalidData(format!("{e:?}")))?;

    let mut sum = 0.0;
    for (p, t) in pred.chunks_exact(4).zip(gt.chunks_exact(4)) {
        let p: [f32; 4] = [p[0], p[1], p[2], p[3]];
        let t: [f32; 4] = [t[0], t[1], t[2], t[3]];
        sum += angular_distance_deg(&p, &t);
    }

    Ok(sum / batch as f32)
}
