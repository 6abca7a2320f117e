//! Tensor operations.
//! This module provides the element-wise, reduction, and windowing
//! operations the layers are built from.

mod arithmetic;
mod math;
mod reduction;
mod window;

pub use arithmetic::*;
pub use math::*;
pub use reduction::*;
pub use window::*;
