//! Integration tests for model composition.

use approx::assert_relative_eq;
use neurust::{
    nn::{
        BatchNormMode, BatchNormalization, Dropout, Linear, LocalResponseNorm, Model, Phase, ReLU,
        Sigmoid, Softmax,
    },
    NeurustError, Tensor,
};

fn mlp() -> Model<f64> {
    Model::new()
        .add(Box::new(Linear::<f64>::new(4, 8)))
        .add(Box::new(Sigmoid))
        .add(Box::new(BatchNormalization::new(&[8])))
        .add(Box::new(Linear::new(8, 3)))
        .add(Box::new(Softmax))
}

fn batch(rows: usize, cols: usize) -> Tensor<f64> {
    let data = (0..rows * cols)
        .map(|i| (i as f64 * 0.37).sin())
        .collect::<Vec<_>>();
    Tensor::from_vec(data, vec![rows, cols]).unwrap()
}

#[test]
fn test_mlp_forward_shapes() {
    let mut model = mlp();
    let input = batch(6, 4);

    let train_out = model.forward(&input, Phase::Train).unwrap();
    assert_eq!(train_out.shape(), &[6, 3]);

    let test_out = model.forward(&input, Phase::Test).unwrap();
    assert_eq!(test_out.shape(), &[6, 3]);

    // Softmax head: every row is a distribution
    for row in test_out.data().chunks(3) {
        assert_relative_eq!(row.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
        assert!(row.iter().all(|&p| p >= 0.0));
    }
}

#[test]
fn test_test_phase_before_any_training_fails() {
    let mut model = mlp();
    let input = batch(2, 4);
    let err = model.forward(&input, Phase::Test).unwrap_err();
    assert!(matches!(err, NeurustError::UninitializedState(_)));
}

#[test]
fn test_repeated_training_drifts_inference_output() {
    let mut model = mlp();
    let input = batch(5, 4);

    model.forward(&input, Phase::Train).unwrap();
    let first = model.forward(&input, Phase::Test).unwrap();

    // Another training pass over a different batch moves the running
    // statistics, so the same inference input now maps elsewhere.
    let other = batch(5, 4).mul_scalar(3.0).add_scalar(1.0);
    model.forward(&other, Phase::Train).unwrap();
    let second = model.forward(&input, Phase::Test).unwrap();

    assert_ne!(first, second);
}

#[test]
fn test_params_are_identical_tensors_across_calls() {
    let mut model = mlp();

    let before: Vec<*const Tensor<f64>> = model.params().iter().map(|p| *p as *const _).collect();
    // Linear(4, 8) + BatchNormalization(8) + Linear(8, 3), two tensors each
    assert_eq!(before.len(), 6);

    let input = batch(3, 4);
    model.forward(&input, Phase::Train).unwrap();
    model.forward(&input, Phase::Test).unwrap();

    let after: Vec<*const Tensor<f64>> = model.params().iter().map(|p| *p as *const _).collect();
    assert_eq!(before, after);
}

#[test]
fn test_optimizer_writes_land_on_the_layer() {
    let mut model: Model<f64> = Model::new().add(Box::new(Linear::<f64>::new(2, 1)));

    // An external optimizer overwrites parameter values in place between
    // forward passes; identity of the tensors guarantees the writes land.
    {
        let mut params = model.params_mut();
        params[0].data_mut().copy_from_slice(&[1.0, 1.0]);
        params[1].data_mut().copy_from_slice(&[0.5]);
    }

    let input = Tensor::from_vec(vec![2.0, 3.0], vec![1, 2]).unwrap();
    let out = model.forward(&input, Phase::Test).unwrap();
    assert_relative_eq!(out.data()[0], 2.0 + 3.0 + 0.5);
}

#[test]
fn test_convolutional_style_stack_with_lrn() {
    let mut model: Model<f64> = Model::new()
        .add(Box::new(LocalResponseNorm::<f64>::new(3, 1e-4, 0.75, 2.0).unwrap()))
        .add(Box::new(ReLU));

    let input = Tensor::from_vec(
        (0..32).map(|i| f64::from(i) - 16.0).collect(),
        vec![2, 4, 2, 2],
    )
    .unwrap();

    let train_out = model.forward(&input, Phase::Train).unwrap();
    let test_out = model.forward(&input, Phase::Test).unwrap();
    assert_eq!(train_out.shape(), &[2, 4, 2, 2]);
    // Nothing in this stack distinguishes the phases
    assert_eq!(train_out, test_out);
}

#[test]
fn test_dropout_distinguishes_phases() {
    let mut model: Model<f64> = Model::new().add(Box::new(Dropout::new(0.5, Some(11)).unwrap()));
    let input = Tensor::from_vec(vec![1.0; 100], vec![10, 10]).unwrap();

    let train_out = model.forward(&input, Phase::Train).unwrap();
    let test_out = model.forward(&input, Phase::Test).unwrap();

    assert!(train_out.data().iter().any(|&v| v == 0.0));
    assert_eq!(test_out, input);
}

#[test]
fn test_samplewise_batch_norm_needs_no_training() {
    let mut model: Model<f64> = Model::new().add(Box::new(
        BatchNormalization::<f64>::new(&[4]).with_mode(BatchNormMode::Samplewise),
    ));
    let input = batch(3, 4);
    // Inference straight away: samplewise mode never consults running state
    let out = model.forward(&input, Phase::Test).unwrap();
    assert_eq!(out.shape(), &[3, 4]);
}
