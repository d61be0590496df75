//! Loss functions and evaluation metrics for pose regression.

mod pose;

pub use pose::{rotation_error_deg, PoseLoss, NORM_EPS};
