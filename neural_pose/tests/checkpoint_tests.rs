//! Checkpoint persistence tests.

use burn::backend::ndarray::NdArrayDevice;
use burn::backend::NdArray;
use burn::prelude::*;
use burn::tensor::Distribution;
use neural_pose::prelude::*;
use tempfile::TempDir;

type TestBackend = NdArray;

fn tiny_model(device: &NdArrayDevice) -> PoseNet<TestBackend> {
    let backbone = ConvBackbone::new(&ConvBackboneConfig::tiny(), device);
    PoseNet::new(&PoseNetConfig::new().with_latent_dim(16), backbone, device)
}

#[test]
fn test_checkpoint_exists_after_save() {
    let dir = TempDir::new().unwrap();
    let device = NdArrayDevice::Cpu;
    let model = tiny_model(&device);

    assert!(!checkpoint_exists(dir.path()));
    save_checkpoint(dir.path(), &model, &CheckpointMetadata::new(1, 2.5), false).unwrap();
    assert!(checkpoint_exists(dir.path()));
}

#[test]
fn test_save_load_roundtrip_preserves_parameters() {
    let dir = TempDir::new().unwrap();
    let device = NdArrayDevice::Cpu;
    let model = tiny_model(&device);

    let probe = Tensor::<TestBackend, 4>::random([2, 3, 16, 16], Distribution::Default, &device);
    let expected: Vec<f32> = model
        .forward(probe.clone())
        .0
        .into_data()
        .to_vec()
        .unwrap();

    save_checkpoint(dir.path(), &model, &CheckpointMetadata::new(3, 1.25), false).unwrap();

    let (loaded, metadata) = load_checkpoint(dir.path(), tiny_model(&device), &device).unwrap();
    assert_eq!(metadata.epoch, 3);
    assert!((metadata.best_loss - 1.25).abs() < 1e-6);

    let actual: Vec<f32> = loaded.forward(probe).0.into_data().to_vec().unwrap();
    assert_eq!(expected, actual);
}

/// The best artifact only advances on strict improvement: for validation
/// losses [5.0, 4.0, 4.5, 3.0] it is rewritten at epochs 1, 2, and 4, but
/// untouched at epoch 3.
#[test]
fn test_best_checkpoint_tracks_strict_improvement() {
    let dir = TempDir::new().unwrap();
    let device = NdArrayDevice::Cpu;
    let model = tiny_model(&device);

    let losses = [5.0_f32, 4.0, 4.5, 3.0];
    let mut best = f32::INFINITY;

    for (i, &loss) in losses.iter().enumerate() {
        let is_best = loss < best;
        if is_best {
            best = loss;
        }
        let epoch = i + 1;
        save_checkpoint(
            dir.path(),
            &model,
            &CheckpointMetadata::new(epoch, best),
            is_best,
        )
        .unwrap();

        let (_, best_meta) =
            load_best_checkpoint(dir.path(), tiny_model(&device), &device).unwrap();
        if epoch == 3 {
            // Not an improvement: the best artifact still holds epoch 2.
            assert_eq!(best_meta.epoch, 2);
            assert!((best_meta.best_loss - 4.0).abs() < 1e-6);
        } else {
            assert_eq!(best_meta.epoch, epoch);
            assert!((best_meta.best_loss - best).abs() < 1e-6);
        }
    }

    let (_, latest) = load_checkpoint(dir.path(), tiny_model(&device), &device).unwrap();
    assert_eq!(latest.epoch, 4);
    assert!((latest.best_loss - 3.0).abs() < 1e-6);
}

#[test]
fn test_latest_checkpoint_is_overwritten() {
    let dir = TempDir::new().unwrap();
    let device = NdArrayDevice::Cpu;
    let model = tiny_model(&device);

    save_checkpoint(dir.path(), &model, &CheckpointMetadata::new(1, 9.0), false).unwrap();
    save_checkpoint(dir.path(), &model, &CheckpointMetadata::new(2, 8.0), false).unwrap();

    let (_, metadata) = load_checkpoint(dir.path(), tiny_model(&device), &device).unwrap();
    assert_eq!(metadata.epoch, 2);
    assert!((metadata.best_loss - 8.0).abs() < 1e-6);
}
