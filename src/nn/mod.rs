//! Neural network building blocks.
//!
//! This module provides the [`Layer`] contract every layer implements, the
//! concrete layers, weight initialization, and the [`Model`] container that
//! threads a batch through an ordered layer stack.

pub mod init;
pub mod layers;

pub use layers::*;

use crate::{error::Result, tensor::Tensor};
use log::debug;
use num_traits::Float;
use std::fmt;

/// The pipeline-wide computation phase.
///
/// A forward pass runs every layer under one phase; it is not a per-layer
/// setting. Training may update a layer's running state as a side effect,
/// inference never mutates anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Train,
    Test,
}

/// Trait for all neural network layers.
///
/// The two forward operations are separate methods rather than a runtime
/// flag so that the training-only side effect is visible in the receiver:
/// [`Layer::train_fprop`] takes `&mut self` and may update running state,
/// [`Layer::test_fprop`] takes `&self` and cannot mutate the layer. Both
/// are otherwise pure functions of the input, the current parameters, and
/// the current running state. Parameter *values* are only ever written from
/// outside, through [`Layer::params_mut`].
pub trait Layer<T>: fmt::Debug {
    /// Forward pass under training semantics.
    fn train_fprop(&mut self, input: &Tensor<T>) -> Result<Tensor<T>>;

    /// Forward pass under inference semantics.
    ///
    /// # Errors
    ///
    /// Fails with `UninitializedState` if the layer needs running state
    /// that no prior training pass has populated.
    fn test_fprop(&self, input: &Tensor<T>) -> Result<Tensor<T>>;

    /// The learnable parameters, in enumeration order.
    ///
    /// The order is stable for the lifetime of the layer; external
    /// optimizers rely on it to match gradients to parameters.
    fn params(&self) -> Vec<&Tensor<T>>;

    /// Mutable view of the learnable parameters, in the same order as
    /// [`Layer::params`].
    fn params_mut(&mut self) -> Vec<&mut Tensor<T>>;

    /// The input shape (without the batch axis) the layer was constructed
    /// for, if it declares one. Shape-agnostic layers return `None`.
    fn input_shape(&self) -> Option<&[usize]> {
        None
    }

    /// A short layer name for summaries and logging.
    fn name(&self) -> &'static str;
}

/// An ordered stack of layers threaded by a single forward pass.
///
/// The model owns its layers; layer `i`'s output feeds layer `i + 1`'s
/// input, and each layer validates the shapes it receives at the point of
/// computation.
#[derive(Debug)]
pub struct Model<T> {
    layers: Vec<Box<dyn Layer<T>>>,
}

impl<T: Float> Model<T> {
    /// Create an empty model.
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Append a layer to the stack.
    pub fn add(mut self, layer: Box<dyn Layer<T>>) -> Self {
        debug!("model: adding layer {} at position {}", layer.name(), self.layers.len());
        self.layers.push(layer);
        self
    }

    /// The number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the model holds no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Thread `input` through every layer in construction order under the
    /// given phase.
    ///
    /// A training pass through a layer with running state (for example a
    /// featurewise [`BatchNormalization`]) updates that state, so repeated
    /// training passes shift what a later inference pass will compute.
    pub fn forward(&mut self, input: &Tensor<T>, phase: Phase) -> Result<Tensor<T>> {
        let mut current: Option<Tensor<T>> = None;
        for layer in self.layers.iter_mut() {
            let x = current.as_ref().unwrap_or(input);
            let y = match phase {
                Phase::Train => layer.train_fprop(x)?,
                Phase::Test => layer.test_fprop(x)?,
            };
            current = Some(y);
        }
        Ok(current.unwrap_or_else(|| input.clone()))
    }

    /// All learnable parameters, flattened in layer order and, within each
    /// layer, in that layer's parameter order.
    ///
    /// The returned borrows alias the layers' own tensors; repeated calls
    /// yield the same tensors in the same order regardless of intervening
    /// forward passes.
    pub fn params(&self) -> Vec<&Tensor<T>> {
        self.layers.iter().flat_map(|l| l.params()).collect()
    }

    /// Mutable counterpart of [`Model::params`]; the write-back surface
    /// for an external optimizer.
    pub fn params_mut(&mut self) -> Vec<&mut Tensor<T>> {
        self.layers.iter_mut().flat_map(|l| l.params_mut()).collect()
    }

    /// Layer names paired with their parameter element counts, in order.
    pub fn summary(&self) -> Vec<(&'static str, usize)> {
        self.layers
            .iter()
            .map(|l| {
                let count = l.params().iter().map(|p| p.len()).sum();
                debug!("model summary: {} ({count} parameter elements)", l.name());
                (l.name(), count)
            })
            .collect()
    }
}

impl<T: Float> Default for Model<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NeurustError;
    use crate::nn::layers::{Linear, Sigmoid};

    #[test]
    fn test_forward_threads_layers() {
        let mut model: Model<f64> = Model::new()
            .add(Box::new(Linear::<f64>::new(3, 4)))
            .add(Box::new(Sigmoid))
            .add(Box::new(Linear::new(4, 2)));
        let input = Tensor::from_vec(vec![0.5; 6], vec![2, 3]).unwrap();
        let out = model.forward(&input, Phase::Train).unwrap();
        assert_eq!(out.shape(), &[2, 2]);
    }

    #[test]
    fn test_empty_model_is_identity() {
        let mut model: Model<f64> = Model::new();
        let input = Tensor::from_vec(vec![1.0, 2.0], vec![1, 2]).unwrap();
        let out = model.forward(&input, Phase::Test).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_incompatible_successive_layers() {
        let mut model: Model<f64> = Model::new()
            .add(Box::new(Linear::<f64>::new(3, 4)))
            .add(Box::new(Linear::new(5, 2)));
        let input = Tensor::from_vec(vec![0.0; 3], vec![1, 3]).unwrap();
        let err = model.forward(&input, Phase::Train).unwrap_err();
        assert!(matches!(err, NeurustError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_params_order_is_stable_across_forwards() {
        let mut model: Model<f64> = Model::new()
            .add(Box::new(Linear::<f64>::new(2, 3)))
            .add(Box::new(Sigmoid))
            .add(Box::new(Linear::new(3, 1)));

        let before: Vec<*const Tensor<f64>> =
            model.params().iter().map(|p| *p as *const _).collect();
        assert_eq!(before.len(), 4); // two weight/bias pairs

        let input = Tensor::from_vec(vec![0.1, 0.2], vec![1, 2]).unwrap();
        model.forward(&input, Phase::Train).unwrap();
        model.forward(&input, Phase::Test).unwrap();

        let after: Vec<*const Tensor<f64>> =
            model.params().iter().map(|p| *p as *const _).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_summary_reports_layers_in_order() {
        let model: Model<f64> = Model::new()
            .add(Box::new(Linear::<f64>::new(2, 3)))
            .add(Box::new(Sigmoid));
        let summary = model.summary();
        assert_eq!(summary, vec![("Linear", 2 * 3 + 3), ("Sigmoid", 0)]);
    }
}
