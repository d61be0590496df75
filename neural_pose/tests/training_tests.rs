//! End-to-end training tests on a tiny backbone.

use burn::backend::ndarray::NdArrayDevice;
use burn::backend::{Autodiff, NdArray};
use burn::module::AutodiffModule;
use burn::optim::AdamConfig;
use burn::prelude::*;
use burn::tensor::Distribution;
use neural_pose::prelude::*;
use tempfile::TempDir;

type TestBackend = Autodiff<NdArray>;

fn tiny_model(dropout: f64, device: &NdArrayDevice) -> PoseNet<TestBackend> {
    let backbone = ConvBackbone::new(&ConvBackboneConfig::tiny(), device);
    PoseNet::new(
        &PoseNetConfig::new().with_latent_dim(16).with_dropout(dropout),
        backbone,
        device,
    )
}

fn random_batch<B: Backend>(batch_size: usize, device: &B::Device) -> PoseBatch<B> {
    let images = Tensor::random(
        [batch_size, 3, 16, 16],
        Distribution::Default,
        device,
    );
    let poses = Tensor::random([batch_size, 7], Distribution::Default, device);
    PoseBatch::new(images, poses).unwrap()
}

/// When predictions already equal the targets, the loss gradient is zero
/// and an optimizer step must leave every parameter unchanged.
#[test]
fn test_zero_loss_step_is_noop() {
    let device = NdArrayDevice::Cpu;
    // Dropout off so the training forward pass is deterministic.
    let model = tiny_model(0.0, &device);
    let config = TrainingConfig::default().with_epochs(1).with_batch_size(2);
    let mut trainer = PoseTrainer::new(config, model).unwrap();
    // No weight decay: decay would perturb parameters even at zero gradient.
    let mut optim = AdamConfig::new().init();

    let images = Tensor::<TestBackend, 4>::random([2, 3, 16, 16], Distribution::Default, &device);
    let (pred_t, pred_r) = trainer.model().forward(images.clone());
    let targets = Tensor::cat(vec![pred_t, pred_r], 1);
    let targets = Tensor::from_data(targets.into_data(), &device);
    let batch = PoseBatch::new(images, targets).unwrap();

    let probe = Tensor::<TestBackend, 4>::random([1, 3, 16, 16], Distribution::Default, &device);
    let before: Vec<f32> = trainer
        .model()
        .forward(probe.clone())
        .0
        .into_data()
        .to_vec()
        .unwrap();

    let stats = trainer.train_epoch(&mut optim, &[batch], 0).unwrap();
    assert!(stats.loss.average < 1e-4, "loss {}", stats.loss.average);

    let after: Vec<f32> = trainer
        .model()
        .forward(probe)
        .0
        .into_data()
        .to_vec()
        .unwrap();

    for (b, a) in before.iter().zip(after.iter()) {
        assert!((b - a).abs() < 1e-7, "parameters moved: {b} -> {a}");
    }
}

#[test]
fn test_training_step_reduces_loss_scale() {
    let device = NdArrayDevice::Cpu;
    let model = tiny_model(0.0, &device);
    let config = TrainingConfig::default()
        .with_epochs(1)
        .with_beta(1.0)
        .with_batch_size(2);
    let mut trainer = PoseTrainer::new(config, model).unwrap();
    let mut optim = AdamConfig::new().init();

    let batch = random_batch::<TestBackend>(4, &device);
    let first = trainer
        .train_epoch(&mut optim, std::slice::from_ref(&batch), 0)
        .unwrap();
    for _ in 0..20 {
        trainer
            .train_epoch(&mut optim, std::slice::from_ref(&batch), 0)
            .unwrap();
    }
    let last = trainer
        .train_epoch(&mut optim, std::slice::from_ref(&batch), 0)
        .unwrap();

    assert!(
        last.loss.average < first.loss.average,
        "loss did not decrease: {} -> {}",
        first.loss.average,
        last.loss.average
    );
}

#[test]
fn test_fit_writes_checkpoints_and_reports() {
    let dir = TempDir::new().unwrap();
    let device = NdArrayDevice::Cpu;
    let model = tiny_model(0.5, &device);
    let config = TrainingConfig::default().with_epochs(2).with_batch_size(2);
    let mut trainer = PoseTrainer::new(config, model).unwrap();
    let mut optim = AdamConfig::new().init();

    let train_batches = vec![random_batch::<TestBackend>(2, &device)];
    let val_batches = vec![random_batch::<NdArray>(2, &device)];

    let report = trainer
        .fit(&mut optim, &train_batches, &val_batches, dir.path())
        .unwrap();

    assert_eq!(report.epochs_run, 2);
    assert!(report.best_loss.is_finite());
    assert!(report.final_validation.is_some());
    assert_eq!(trainer.state().epoch, 2);

    assert!(checkpoint_exists(dir.path()));
    assert!(dir.path().join("checkpoint.bin").exists());
    assert!(dir.path().join("checkpoint.json").exists());
    // Epoch 0 always improves on infinity, so a best artifact must exist.
    assert!(dir.path().join("model_best.bin").exists());
    assert!(dir.path().join("model_best.json").exists());
}

#[test]
fn test_resume_restores_state() {
    let dir = TempDir::new().unwrap();
    let device = NdArrayDevice::Cpu;
    let config = TrainingConfig::default().with_epochs(2).with_batch_size(2);

    let mut trainer = PoseTrainer::new(config.clone(), tiny_model(0.5, &device)).unwrap();
    let mut optim = AdamConfig::new().init();
    let train_batches = vec![random_batch::<TestBackend>(2, &device)];
    let val_batches = vec![random_batch::<NdArray>(2, &device)];
    trainer
        .fit(&mut optim, &train_batches, &val_batches, dir.path())
        .unwrap();
    let best_loss = trainer.state().best_loss;

    let mut resumed = PoseTrainer::new(config, tiny_model(0.5, &device)).unwrap();
    resumed.resume(dir.path(), &device).unwrap();

    assert_eq!(resumed.state().epoch, 2);
    assert!((resumed.state().best_loss - best_loss).abs() < 1e-6);
}

#[test]
fn test_validation_does_not_change_parameters() {
    let device = NdArrayDevice::Cpu;
    let model = tiny_model(0.5, &device);
    let trainer = PoseTrainer::new(TrainingConfig::default(), model).unwrap();

    let probe = Tensor::<TestBackend, 4>::random([1, 3, 16, 16], Distribution::Default, &device);
    let before: Vec<f32> = trainer
        .model()
        .valid()
        .forward(Tensor::from_data(probe.to_data(), &device))
        .0
        .into_data()
        .to_vec()
        .unwrap();

    let val_batches = vec![random_batch::<NdArray>(3, &device)];
    trainer.validate(&val_batches).unwrap();

    let after: Vec<f32> = trainer
        .model()
        .valid()
        .forward(Tensor::from_data(probe.to_data(), &device))
        .0
        .into_data()
        .to_vec()
        .unwrap();

    assert_eq!(before, after);
}
