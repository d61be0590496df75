//! Learning-rate schedules.

/// Step-decay learning-rate schedule.
///
/// The rate is a pure function of the epoch index:
/// `rate(epoch) = base_rate * gamma^(epoch / step_size)` with integer
/// division. With the reference settings (`base_rate = 1e-4`,
/// `step_size = 80`, `gamma = 0.1`) the rate drops by a factor of ten
/// every 80 epochs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepDecay {
    /// Rate used for the first `step_size` epochs.
    pub base_rate: f64,
    /// Number of epochs between decay steps.
    pub step_size: usize,
    /// Multiplicative decay factor applied at each step.
    pub gamma: f64,
}

impl StepDecay {
    /// Create a schedule with the conventional 0.1 decay factor.
    pub fn new(base_rate: f64, step_size: usize) -> Self {
        Self {
            base_rate,
            step_size,
            gamma: 0.1,
        }
    }

    /// Override the decay factor.
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Learning rate for the given epoch.
    ///
    /// A `step_size` of zero disables decay and always returns the base
    /// rate.
    pub fn rate(&self, epoch: usize) -> f64 {
        if self.step_size == 0 {
            return self.base_rate;
        }
        let steps = (epoch / self.step_size) as i32;
        self.base_rate * self.gamma.powi(steps)
    }
}
