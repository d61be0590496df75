//! Per-epoch metric accumulation.

use pose_core::AverageMeter;

/// Running metrics for one training epoch.
///
/// One meter per metric, each weighted by batch size so the averages are
/// per-sample means across the epoch. Reset at the start of every epoch.
#[derive(Debug, Clone, Default)]
pub struct TrainEpochStats {
    /// Combined loss meter.
    pub loss: AverageMeter,
    /// Translation loss meter.
    pub trans_loss: AverageMeter,
    /// Rotation loss meter (beta-scaled, as it enters the objective).
    pub rot_loss: AverageMeter,
}

impl TrainEpochStats {
    /// Create zeroed stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one batch's losses.
    pub fn record(&mut self, loss: f32, trans_loss: f32, rot_loss: f32, batch_size: usize) {
        self.loss.update(loss, batch_size);
        self.trans_loss.update(trans_loss, batch_size);
        self.rot_loss.update(rot_loss, batch_size);
    }
}

/// Final averages from one validation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationStats {
    /// Combined loss average.
    pub loss: f32,
    /// Translation loss average.
    pub trans_loss: f32,
    /// Rotation loss average (beta-scaled).
    pub rot_loss: f32,
    /// Rotation angular error average, in degrees.
    pub rot_error_deg: f32,
}
