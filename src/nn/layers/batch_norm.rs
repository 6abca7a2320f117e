//! Batch normalization layer.
//!
//! Normalizes activations with batch statistics during training while
//! accumulating an exponential moving estimate of the population mean and
//! standard deviation; inference uses the accumulated estimate in place of
//! batch statistics. Samplewise mode instead normalizes each example over
//! its trailing axis and keeps no state at all.

use crate::{
    error::{NeurustError, Result},
    nn::{init, Layer},
    tensor::Tensor,
};
use log::debug;
use num_traits::Float;
use std::fmt;

/// Which axis batch normalization computes its statistics over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchNormMode {
    /// Per-feature statistics across the batch axis. Running estimates
    /// accumulate during training and replace batch statistics at test
    /// time.
    Featurewise,
    /// Per-example statistics across the trailing axis, computed fresh on
    /// every call in both phases.
    Samplewise,
}

/// Batch normalization layer.
///
/// The learnable scale `gamma` and shift `beta` both have the layer's
/// input shape. In featurewise mode the layer carries running mean/std
/// estimates that are absent until the first training pass, then updated
/// by exponential moving average on every subsequent one.
#[derive(Debug)]
pub struct BatchNormalization<T> {
    input_shape: Vec<usize>,
    epsilon: T,
    mode: BatchNormMode,
    momentum: T,
    gamma: Tensor<T>,
    beta: Tensor<T>,
    running_mean: Option<Tensor<T>>,
    running_std: Option<Tensor<T>>,
}

impl<T: Float + fmt::Debug> BatchNormalization<T> {
    /// Creates a featurewise batch normalization layer for inputs of shape
    /// `[batch, ..input_shape]`.
    ///
    /// Defaults: `epsilon = 1e-6`, `momentum = 0.9`. `gamma` is sampled
    /// from a small bounded-uniform distribution, `beta` starts at zero.
    pub fn new(input_shape: &[usize]) -> Self {
        Self {
            input_shape: input_shape.to_vec(),
            epsilon: T::from(1e-6).unwrap(),
            mode: BatchNormMode::Featurewise,
            momentum: T::from(0.9).unwrap(),
            gamma: init::uniform(input_shape, -0.05, 0.05),
            beta: Tensor::zeros(input_shape),
            running_mean: None,
            running_std: None,
        }
    }

    /// Override the epsilon floor.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: T) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Override the normalization mode.
    #[must_use]
    pub fn with_mode(mut self, mode: BatchNormMode) -> Self {
        self.mode = mode;
        self
    }

    /// Override the running-statistics momentum.
    ///
    /// # Errors
    ///
    /// Returns an error if `momentum` is outside `[0, 1]`.
    pub fn with_momentum(mut self, momentum: T) -> Result<Self> {
        if momentum < T::zero() || momentum > T::one() {
            return Err(NeurustError::InvalidConfiguration(format!(
                "batch norm momentum must be in [0, 1], got {momentum:?}"
            )));
        }
        self.momentum = momentum;
        Ok(self)
    }

    /// The epsilon floor.
    pub fn epsilon(&self) -> T {
        self.epsilon
    }

    /// The normalization mode.
    pub fn mode(&self) -> BatchNormMode {
        self.mode
    }

    /// The running-statistics momentum.
    pub fn momentum(&self) -> T {
        self.momentum
    }

    /// The learnable scale.
    pub fn gamma(&self) -> &Tensor<T> {
        &self.gamma
    }

    /// The learnable shift.
    pub fn beta(&self) -> &Tensor<T> {
        &self.beta
    }

    /// The running mean estimate, absent until the first training pass.
    pub fn running_mean(&self) -> Option<&Tensor<T>> {
        self.running_mean.as_ref()
    }

    /// The running standard-deviation estimate, absent until the first
    /// training pass.
    pub fn running_std(&self) -> Option<&Tensor<T>> {
        self.running_std.as_ref()
    }

    fn check_input(&self, input: &Tensor<T>) -> Result<()> {
        if input.ndim() == 0 || input.shape()[1..] != self.input_shape[..] {
            return Err(NeurustError::ShapeMismatch {
                expected: self.input_shape.clone(),
                actual: input.shape().to_vec(),
            });
        }
        Ok(())
    }

    /// Normalize with the given statistics, then scale and shift.
    fn affine(&self, input: &Tensor<T>, mean: &Tensor<T>, std: &Tensor<T>) -> Result<Tensor<T>> {
        let normed = input.sub(mean)?.div(&std.add_scalar(self.epsilon))?;
        normed.mul(&self.gamma)?.add(&self.beta)
    }

    /// Per-example statistics over the trailing axis; identical in both
    /// phases and touches no running state.
    fn samplewise_fprop(&self, input: &Tensor<T>) -> Result<Tensor<T>> {
        let axis = input.ndim() - 1;
        let mean = input.mean_axis(axis, true)?;
        let std = input.std_axis(axis, true)?;
        self.affine(input, &mean, &std)
    }

    fn featurewise_train(&mut self, input: &Tensor<T>) -> Result<Tensor<T>> {
        let mean = input.mean_axis(0, false)?;
        // Deviation is taken around the mean with the epsilon folded in
        // before the square root, so cancellation can never feed sqrt a
        // negative argument.
        let centered = input.sub(&mean)?;
        let std = centered
            .square()
            .add_scalar(self.epsilon)
            .mean_axis(0, false)?
            .sqrt();

        match (&mut self.running_mean, &mut self.running_std) {
            (Some(running_mean), Some(running_std)) => {
                let blend = T::one() - self.momentum;
                *running_mean = running_mean
                    .mul_scalar(self.momentum)
                    .add(&mean.mul_scalar(blend))?;
                *running_std = running_std
                    .mul_scalar(self.momentum)
                    .add(&std.mul_scalar(blend))?;
            }
            _ => {
                // First training pass: the moving average has no prior
                // estimate, so the batch statistics are taken verbatim.
                debug!(
                    "batch norm: capturing initial running statistics over {} feature elements",
                    mean.len()
                );
                self.running_mean = Some(mean.clone());
                self.running_std = Some(std.clone());
            }
        }

        self.affine(input, &mean, &std)
    }

    fn featurewise_test(&self, input: &Tensor<T>) -> Result<Tensor<T>> {
        let mean = self.running_mean.as_ref().ok_or(NeurustError::UninitializedState(
            "featurewise batch normalization needs a training pass before inference",
        ))?;
        let std = self.running_std.as_ref().ok_or(NeurustError::UninitializedState(
            "featurewise batch normalization needs a training pass before inference",
        ))?;
        self.affine(input, mean, std)
    }
}

impl<T: Float + fmt::Debug> Layer<T> for BatchNormalization<T> {
    fn train_fprop(&mut self, input: &Tensor<T>) -> Result<Tensor<T>> {
        self.check_input(input)?;
        match self.mode {
            BatchNormMode::Featurewise => self.featurewise_train(input),
            BatchNormMode::Samplewise => self.samplewise_fprop(input),
        }
    }

    fn test_fprop(&self, input: &Tensor<T>) -> Result<Tensor<T>> {
        self.check_input(input)?;
        match self.mode {
            BatchNormMode::Featurewise => self.featurewise_test(input),
            BatchNormMode::Samplewise => self.samplewise_fprop(input),
        }
    }

    fn params(&self) -> Vec<&Tensor<T>> {
        vec![&self.gamma, &self.beta]
    }

    fn params_mut(&mut self) -> Vec<&mut Tensor<T>> {
        vec![&mut self.gamma, &mut self.beta]
    }

    fn input_shape(&self) -> Option<&[usize]> {
        Some(&self.input_shape)
    }

    fn name(&self) -> &'static str {
        "BatchNormalization"
    }
}
