//! Fully connected layer.

use crate::{
    error::{NeurustError, Result},
    nn::{init, Layer},
    tensor::Tensor,
};
use num_traits::Float;
use std::fmt;

/// A fully connected layer, `y = x @ W + b`.
///
/// `W` has shape `[input_dim, output_dim]` and is Xavier-uniform
/// initialized; `b` has shape `[output_dim]` and starts at zero. The layer
/// computes the same function in both phases. Parameters enumerate as
/// `[W, b]`.
#[derive(Debug)]
pub struct Linear<T> {
    input_shape: Vec<usize>,
    output_dim: usize,
    weights: Tensor<T>,
    bias: Tensor<T>,
}

impl<T: Float> Linear<T> {
    /// Creates a layer mapping `input_dim` features to `output_dim`.
    pub fn new(input_dim: usize, output_dim: usize) -> Self {
        Self {
            input_shape: vec![input_dim],
            output_dim,
            weights: init::xavier_uniform(input_dim, output_dim),
            bias: Tensor::zeros(&[output_dim]),
        }
    }

    /// The input feature count.
    pub fn input_dim(&self) -> usize {
        self.input_shape[0]
    }

    /// The output feature count.
    pub fn output_dim(&self) -> usize {
        self.output_dim
    }

    /// The weight matrix.
    pub fn weights(&self) -> &Tensor<T> {
        &self.weights
    }

    /// The bias vector.
    pub fn bias(&self) -> &Tensor<T> {
        &self.bias
    }

    fn fprop(&self, input: &Tensor<T>) -> Result<Tensor<T>> {
        if input.ndim() != 2 || input.shape()[1] != self.input_dim() {
            return Err(NeurustError::ShapeMismatch {
                expected: self.input_shape.clone(),
                actual: input.shape().to_vec(),
            });
        }
        input.matmul(&self.weights)?.add(&self.bias)
    }
}

impl<T: Float + fmt::Debug> Layer<T> for Linear<T> {
    fn train_fprop(&mut self, input: &Tensor<T>) -> Result<Tensor<T>> {
        self.fprop(input)
    }

    fn test_fprop(&self, input: &Tensor<T>) -> Result<Tensor<T>> {
        self.fprop(input)
    }

    fn params(&self) -> Vec<&Tensor<T>> {
        vec![&self.weights, &self.bias]
    }

    fn params_mut(&mut self) -> Vec<&mut Tensor<T>> {
        vec![&mut self.weights, &mut self.bias]
    }

    fn input_shape(&self) -> Option<&[usize]> {
        Some(&self.input_shape)
    }

    fn name(&self) -> &'static str {
        "Linear"
    }
}
