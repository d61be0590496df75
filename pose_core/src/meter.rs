//! Running-average metric tracking.

/// Tracks the current value and running average of a scalar metric.
///
/// The training and validation loops keep one meter per metric (loss,
/// translation loss, rotation loss, angular error) and feed it once per
/// batch, weighted by the batch size. Reading [`AverageMeter::average`]
/// before any update returns 0.0; callers guarantee at least one update
/// per epoch phase before reporting (the trainer rejects empty epochs
/// up front).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AverageMeter {
    /// Most recently recorded value.
    pub value: f32,
    /// Weighted sum of all recorded values since the last reset.
    pub sum: f32,
    /// Total weight recorded since the last reset.
    pub count: usize,
    /// Running average `sum / count`.
    pub average: f32,
}

impl AverageMeter {
    /// Create a zeroed meter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero all fields, starting a fresh accumulation.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record `value` with the given weight and recompute the average.
    ///
    /// The weight is typically the batch size, so the average is the
    /// per-sample mean across the epoch rather than the per-batch mean.
    pub fn update(&mut self, value: f32, weight: usize) {
        self.value = value;
        self.sum += value * weight as f32;
        self.count += weight;
        if self.count > 0 {
            self.average = self.sum / self.count as f32;
        }
    }
}
