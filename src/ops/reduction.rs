//! Reduction operations for tensors.

use crate::{
    error::{NeurustError, Result},
    tensor::Tensor,
};
use num_traits::Float;

/// The output shape of reducing `shape` along `axis`.
fn reduced_shape(shape: &[usize], axis: usize, keep_dim: bool) -> Vec<usize> {
    let mut out = shape.to_vec();
    if keep_dim {
        out[axis] = 1;
    } else {
        out.remove(axis);
    }
    out
}

/// Compute the mean along `axis`.
///
/// # Arguments
///
/// * `tensor` - The tensor to reduce.
/// * `axis` - The axis to reduce over.
/// * `keep_dim` - Whether to retain the reduced axis with length one
///   (needed when the result broadcasts back against the input).
pub fn mean_axis<T: Float>(
    tensor: &Tensor<T>,
    axis: usize,
    keep_dim: bool,
) -> Result<Tensor<T>> {
    let shape = tensor.shape();
    if axis >= shape.len() {
        return Err(NeurustError::InvalidAxis(axis, shape.len()));
    }
    let axis_len = shape[axis];
    let outer: usize = shape[..axis].iter().product();
    let inner: usize = shape[axis + 1..].iter().product();
    let denom = T::from(axis_len).unwrap();

    let mut data = Vec::with_capacity(outer * inner);
    for o in 0..outer {
        for i in 0..inner {
            let mut sum = T::zero();
            for a in 0..axis_len {
                sum = sum + tensor.data()[(o * axis_len + a) * inner + i];
            }
            data.push(sum / denom);
        }
    }
    Tensor::from_vec(data, reduced_shape(shape, axis, keep_dim))
}

/// Compute the standard deviation along `axis`.
///
/// The deviation is taken as `sqrt(mean((x - m)^2))` rather than by
/// subtracting second moments, so floating-point cancellation cannot
/// produce a negative argument to the square root.
pub fn std_axis<T: Float>(
    tensor: &Tensor<T>,
    axis: usize,
    keep_dim: bool,
) -> Result<Tensor<T>> {
    let shape = tensor.shape();
    if axis >= shape.len() {
        return Err(NeurustError::InvalidAxis(axis, shape.len()));
    }
    let axis_len = shape[axis];
    let outer: usize = shape[..axis].iter().product();
    let inner: usize = shape[axis + 1..].iter().product();
    let denom = T::from(axis_len).unwrap();

    let mut data = Vec::with_capacity(outer * inner);
    for o in 0..outer {
        for i in 0..inner {
            let mut sum = T::zero();
            for a in 0..axis_len {
                sum = sum + tensor.data()[(o * axis_len + a) * inner + i];
            }
            let mean = sum / denom;
            let mut sq_sum = T::zero();
            for a in 0..axis_len {
                let diff = tensor.data()[(o * axis_len + a) * inner + i] - mean;
                sq_sum = sq_sum + diff * diff;
            }
            data.push((sq_sum / denom).sqrt());
        }
    }
    Tensor::from_vec(data, reduced_shape(shape, axis, keep_dim))
}
