//! Matrix multiplication.

use crate::{
    error::{NeurustError, Result},
    tensor::Tensor,
};
use num_traits::Float;

/// Multiplies two 2-D tensors, `[m, k] @ [k, n] -> [m, n]`.
///
/// # Errors
///
/// Returns an error if either operand is not 2-D or the inner dimensions
/// disagree.
pub fn matmul<T: Float>(lhs: &Tensor<T>, rhs: &Tensor<T>) -> Result<Tensor<T>> {
    if lhs.ndim() != 2 || rhs.ndim() != 2 || lhs.shape()[1] != rhs.shape()[0] {
        return Err(NeurustError::IncompatibleShapes(
            lhs.shape().to_vec(),
            rhs.shape().to_vec(),
        ));
    }
    let m = lhs.shape()[0];
    let k = lhs.shape()[1];
    let n = rhs.shape()[1];

    let mut data = vec![T::zero(); m * n];
    for i in 0..m {
        for l in 0..k {
            let a = lhs.data()[i * k + l];
            for j in 0..n {
                data[i * n + j] = data[i * n + j] + a * rhs.data()[l * n + j];
            }
        }
    }
    Tensor::from_vec(data, vec![m, n])
}
