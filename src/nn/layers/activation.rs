//! Activation layers.
//!
//! Parameterless, stateless layers that apply a fixed nonlinearity; train
//! and test phases compute the same function.

use crate::{error::Result, nn::Layer, ops, tensor::Tensor};
use num_traits::Float;

/// Logistic sigmoid activation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sigmoid;

/// Rectified linear activation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReLU;

/// Softmax over the last axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct Softmax;

impl<T: Float> Layer<T> for Sigmoid {
    fn train_fprop(&mut self, input: &Tensor<T>) -> Result<Tensor<T>> {
        Ok(ops::sigmoid(input))
    }

    fn test_fprop(&self, input: &Tensor<T>) -> Result<Tensor<T>> {
        Ok(ops::sigmoid(input))
    }

    fn params(&self) -> Vec<&Tensor<T>> {
        Vec::new()
    }

    fn params_mut(&mut self) -> Vec<&mut Tensor<T>> {
        Vec::new()
    }

    fn name(&self) -> &'static str {
        "Sigmoid"
    }
}

impl<T: Float> Layer<T> for ReLU {
    fn train_fprop(&mut self, input: &Tensor<T>) -> Result<Tensor<T>> {
        Ok(ops::relu(input))
    }

    fn test_fprop(&self, input: &Tensor<T>) -> Result<Tensor<T>> {
        Ok(ops::relu(input))
    }

    fn params(&self) -> Vec<&Tensor<T>> {
        Vec::new()
    }

    fn params_mut(&mut self) -> Vec<&mut Tensor<T>> {
        Vec::new()
    }

    fn name(&self) -> &'static str {
        "ReLU"
    }
}

impl<T: Float> Layer<T> for Softmax {
    fn train_fprop(&mut self, input: &Tensor<T>) -> Result<Tensor<T>> {
        ops::softmax(input)
    }

    fn test_fprop(&self, input: &Tensor<T>) -> Result<Tensor<T>> {
        ops::softmax(input)
    }

    fn params(&self) -> Vec<&Tensor<T>> {
        Vec::new()
    }

    fn params_mut(&mut self) -> Vec<&mut Tensor<T>> {
        Vec::new()
    }

    fn name(&self) -> &'static str {
        "Softmax"
    }
}
