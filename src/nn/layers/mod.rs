//! Concrete layer implementations.

mod activation;
mod batch_norm;
mod dropout;
mod linear;
mod lrn;

pub use activation::{ReLU, Sigmoid, Softmax};
pub use batch_norm::{BatchNormMode, BatchNormalization};
pub use dropout::Dropout;
pub use linear::Linear;
pub use lrn::LocalResponseNorm;
