//! Local response normalization layer.

use crate::{
    error::{NeurustError, Result},
    nn::Layer,
    ops,
    tensor::Tensor,
};
use num_traits::Float;
use std::fmt;

/// Local response normalization.
///
/// Divides every activation by a power of the summed squares in an
/// `n`-wide window of neighbouring channels (axis 1), zero-padded at the
/// edges:
///
/// `output = input / (k + alpha * window_sum(input^2))^beta`
///
/// The transform is stateless, has no learnable parameters, preserves the
/// input shape, and computes exactly the same function in both phases.
#[derive(Debug, Clone)]
pub struct LocalResponseNorm<T> {
    n: usize,
    alpha: T,
    beta: T,
    k: T,
}

impl<T: Float> LocalResponseNorm<T> {
    /// Creates a layer with window size `n` and the given scaling
    /// parameters.
    ///
    /// # Errors
    ///
    /// Returns an error for an even `n`; the window is centred on each
    /// channel, so only odd sizes are supported.
    pub fn new(n: usize, alpha: T, beta: T, k: T) -> Result<Self> {
        if n % 2 == 0 {
            return Err(NeurustError::InvalidConfiguration(format!(
                "local response window size must be odd, got {n}"
            )));
        }
        Ok(Self { n, alpha, beta, k })
    }

    /// The window size.
    pub fn n(&self) -> usize {
        self.n
    }

    /// The scaling parameter.
    pub fn alpha(&self) -> T {
        self.alpha
    }

    /// The exponent parameter.
    pub fn beta(&self) -> T {
        self.beta
    }

    /// The additive floor.
    pub fn k(&self) -> T {
        self.k
    }

    fn fprop(&self, input: &Tensor<T>) -> Result<Tensor<T>> {
        let summed = ops::sliding_window_sum(&input.square(), self.n)?;
        let scale = summed.mul_scalar(self.alpha).add_scalar(self.k);
        input.div(&scale.powf(self.beta))
    }
}

impl<T: Float> Default for LocalResponseNorm<T> {
    /// The classic AlexNet-style parameterization:
    /// `n = 5, alpha = 1e-4, beta = 0.75, k = 2`.
    fn default() -> Self {
        Self {
            n: 5,
            alpha: T::from(1e-4).unwrap(),
            beta: T::from(0.75).unwrap(),
            k: T::from(2.0).unwrap(),
        }
    }
}

impl<T: Float + fmt::Debug> Layer<T> for LocalResponseNorm<T> {
    fn train_fprop(&mut self, input: &Tensor<T>) -> Result<Tensor<T>> {
        self.fprop(input)
    }

    fn test_fprop(&self, input: &Tensor<T>) -> Result<Tensor<T>> {
        self.fprop(input)
    }

    fn params(&self) -> Vec<&Tensor<T>> {
        Vec::new()
    }

    fn params_mut(&mut self) -> Vec<&mut Tensor<T>> {
        Vec::new()
    }

    fn name(&self) -> &'static str {
        "LocalResponseNorm"
    }
}
