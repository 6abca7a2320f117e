//! Arithmetic operations for tensors.

use crate::{
    error::{NeurustError, Result},
    tensor::Tensor,
};
use num_traits::Float;

/// Computes the result shape of broadcasting `lhs` against `rhs` under
/// right-aligned rules: each trailing dimension pair must be equal or one
/// of them must be 1.
fn broadcast_shape(lhs: &[usize], rhs: &[usize]) -> Result<Vec<usize>> {
    let ndim = lhs.len().max(rhs.len());
    let mut shape = vec![0; ndim];
    for i in 0..ndim {
        let a = if i < ndim - lhs.len() {
            1
        } else {
            lhs[i - (ndim - lhs.len())]
        };
        let b = if i < ndim - rhs.len() {
            1
        } else {
            rhs[i - (ndim - rhs.len())]
        };
        shape[i] = if a == b {
            a
        } else if a == 1 {
            b
        } else if b == 1 {
            a
        } else {
            return Err(NeurustError::IncompatibleShapes(
                lhs.to_vec(),
                rhs.to_vec(),
            ));
        };
    }
    Ok(shape)
}

/// Row-major strides of `shape` aligned to `ndim` output dimensions, with
/// stride 0 wherever the dimension is broadcast.
fn broadcast_strides(shape: &[usize], ndim: usize) -> Vec<usize> {
    let mut strides = vec![0; ndim];
    let offset = ndim - shape.len();
    let mut acc = 1;
    for i in (0..shape.len()).rev() {
        strides[offset + i] = if shape[i] == 1 { 0 } else { acc };
        acc *= shape[i];
    }
    strides
}

/// Combines two tensors element-wise under broadcasting with `f`.
fn zip_broadcast<T, F>(lhs: &Tensor<T>, rhs: &Tensor<T>, f: F) -> Result<Tensor<T>>
where
    T: Float,
    F: Fn(T, T) -> T,
{
    let shape = broadcast_shape(lhs.shape(), rhs.shape())?;
    let ndim = shape.len();
    let lhs_strides = broadcast_strides(lhs.shape(), ndim);
    let rhs_strides = broadcast_strides(rhs.shape(), ndim);
    let size: usize = shape.iter().product();

    let mut data = Vec::with_capacity(size);
    let mut index = vec![0usize; ndim];
    for _ in 0..size {
        let mut li = 0;
        let mut ri = 0;
        for d in 0..ndim {
            li += index[d] * lhs_strides[d];
            ri += index[d] * rhs_strides[d];
        }
        data.push(f(lhs.data()[li], rhs.data()[ri]));
        for d in (0..ndim).rev() {
            index[d] += 1;
            if index[d] < shape[d] {
                break;
            }
            index[d] = 0;
        }
    }
    Tensor::from_vec(data, shape)
}

/// Element-wise addition of two tensors with broadcasting.
pub fn add<T: Float>(lhs: &Tensor<T>, rhs: &Tensor<T>) -> Result<Tensor<T>> {
    zip_broadcast(lhs, rhs, |a, b| a + b)
}

/// Element-wise subtraction of two tensors with broadcasting.
pub fn sub<T: Float>(lhs: &Tensor<T>, rhs: &Tensor<T>) -> Result<Tensor<T>> {
    zip_broadcast(lhs, rhs, |a, b| a - b)
}

/// Element-wise multiplication of two tensors with broadcasting.
pub fn mul<T: Float>(lhs: &Tensor<T>, rhs: &Tensor<T>) -> Result<Tensor<T>> {
    zip_broadcast(lhs, rhs, |a, b| a * b)
}

/// Element-wise division of two tensors with broadcasting.
pub fn div<T: Float>(lhs: &Tensor<T>, rhs: &Tensor<T>) -> Result<Tensor<T>> {
    zip_broadcast(lhs, rhs, |a, b| a / b)
}
