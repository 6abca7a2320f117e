//! Neurust: a small neural-network modeling toolkit.
//!
//! The crate is built around three pieces:
//!
//! - [`Tensor`]: a dense n-dimensional array with broadcasting
//!   element-wise arithmetic, axis reductions, and a sliding-window
//!   primitive.
//! - [`nn::Layer`]: the contract every layer implements, with a training
//!   forward pass that may update the layer's running state, an inference
//!   forward pass that never mutates anything, and an ordered view of the
//!   layer's learnable parameters.
//! - [`nn::Model`]: an ordered layer stack threaded by a single forward
//!   pass under one pipeline-wide [`nn::Phase`], exposing the flattened
//!   parameter list an external optimizer updates in place.
//!
//! # Example
//!
//! ```
//! use neurust::{
//!     nn::{BatchNormalization, Linear, Model, Phase, Sigmoid},
//!     Tensor,
//! };
//!
//! # fn main() -> neurust::Result<()> {
//! let mut model: Model<f64> = Model::new()
//!     .add(Box::new(Linear::<f64>::new(3, 4)))
//!     .add(Box::new(Sigmoid))
//!     .add(Box::new(BatchNormalization::new(&[4])));
//!
//! let batch = Tensor::from_vec(vec![0.5; 6], vec![2, 3])?;
//! let output = model.forward(&batch, Phase::Train)?;
//! assert_eq!(output.shape(), &[2, 4]);
//!
//! // Running statistics captured by the training pass make inference valid
//! let output = model.forward(&batch, Phase::Test)?;
//! assert_eq!(output.shape(), &[2, 4]);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod linalg;
pub mod nn;
pub mod ops;
pub mod tensor;

pub use error::{NeurustError, Result};
pub use tensor::Tensor;
