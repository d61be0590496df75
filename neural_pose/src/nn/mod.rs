//! Neural network modules: backbone, classifier, and pose regressor.

mod backbone;
mod posenet;

pub use backbone::{ConvBackbone, ImageClassifier};
pub use posenet::{PoseNet, TRANSLATION_HEAD_STD};
