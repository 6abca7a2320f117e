//! Linear algebra operations.

mod matmul;

pub use matmul::*;
