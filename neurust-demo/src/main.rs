//! End-to-end forward-pass demo: build an MLP, run it in both phases, and
//! show the parameter inventory an external optimizer would consume.

use neurust::{
    nn::{init, BatchNormalization, Dropout, Linear, LocalResponseNorm, Model, Phase, ReLU, Sigmoid, Softmax},
    Result, Tensor,
};

fn main() -> Result<()> {
    let mut model: Model<f32> = Model::new()
        .add(Box::new(Linear::<f32>::new(4, 16)))
        .add(Box::new(Sigmoid))
        .add(Box::new(BatchNormalization::new(&[16])))
        .add(Box::new(Dropout::new(0.2, Some(7))?))
        .add(Box::new(Linear::new(16, 3)))
        .add(Box::new(Softmax));

    println!("layers:");
    for (name, param_count) in model.summary() {
        println!("  {name:<20} {param_count} parameter elements");
    }
    let total: usize = model.params().iter().map(|p| p.len()).sum();
    println!("total parameter elements: {total}");

    // A synthetic batch of 8 examples with 4 features each
    let input: Tensor<f32> = init::normal(&[8, 4], 0.0, 1.0);

    let train_out = model.forward(&input, Phase::Train)?;
    println!("\ntraining pass output shape: {:?}", train_out.shape());

    // The training pass captured running statistics, so inference is valid
    let test_out = model.forward(&input, Phase::Test)?;
    println!("inference pass output shape: {:?}", test_out.shape());
    println!("first row of class probabilities: {:?}", &test_out.data()[..3]);

    // Windowed cross-channel normalization over a 4-D activation map
    let mut lrn_stack: Model<f32> =
        Model::new().add(Box::new(LocalResponseNorm::<f32>::default())).add(Box::new(ReLU));
    let feature_map: Tensor<f32> = init::normal(&[2, 8, 4, 4], 0.0, 2.0);
    let normalized = lrn_stack.forward(&feature_map, Phase::Test)?;
    println!("\nLRN output shape: {:?}", normalized.shape());

    Ok(())
}
