//! Core tensor type.
//!
//! This module provides the dense, row-major `Tensor` type that every layer
//! consumes and produces. Operations never mutate their inputs; each call
//! returns a freshly allocated tensor. The element-wise, reduction, and
//! windowing operations themselves live in [`crate::ops`] and
//! [`crate::linalg`]; `Tensor` exposes them as methods for ergonomics.

use crate::error::{NeurustError, Result};
use num_traits::Float;

/// A dense n-dimensional array stored in row-major order.
///
/// # Type Parameters
///
/// * `T`: The floating-point element type (`f32` or `f64` in practice).
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<T> {
    pub(crate) data: Vec<T>,
    pub(crate) shape: Vec<usize>,
}

impl<T: Float> Tensor<T> {
    /// Creates a tensor from a data vector and a shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the data length does not match the shape's
    /// element count.
    pub fn from_vec(data: Vec<T>, shape: Vec<usize>) -> Result<Self> {
        let size: usize = shape.iter().product();
        if data.len() != size {
            return Err(NeurustError::ShapeMismatch {
                expected: vec![size],
                actual: vec![data.len()],
            });
        }
        Ok(Self { data, shape })
    }

    /// Creates a tensor by copying the given slice.
    pub fn from_slice(data: &[T], shape: &[usize]) -> Result<Self> {
        Self::from_vec(data.to_vec(), shape.to_vec())
    }

    /// Creates a tensor of the given shape filled with `value`.
    pub fn full(shape: &[usize], value: T) -> Self {
        let size = shape.iter().product();
        Self {
            data: vec![value; size],
            shape: shape.to_vec(),
        }
    }

    /// Creates a tensor of zeros.
    pub fn zeros(shape: &[usize]) -> Self {
        Self::full(shape, T::zero())
    }

    /// Creates a tensor of ones.
    pub fn ones(shape: &[usize]) -> Self {
        Self::full(shape, T::one())
    }

    /// The shape of the tensor.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// The number of dimensions.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// The total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the tensor holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The underlying data in row-major order.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable access to the underlying data.
    ///
    /// This is the write-back surface an external optimizer uses to
    /// overwrite parameter values in place; the tensor's shape is fixed.
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

// Method forwarding for the operations in `ops` and `linalg`, so layer code
// can chain calls in expression order.
impl<T: Float> Tensor<T> {
    /// Element-wise addition with broadcasting.
    pub fn add(&self, other: &Self) -> Result<Self> {
        crate::ops::add(self, other)
    }

    /// Element-wise subtraction with broadcasting.
    pub fn sub(&self, other: &Self) -> Result<Self> {
        crate::ops::sub(self, other)
    }

    /// Element-wise multiplication with broadcasting.
    pub fn mul(&self, other: &Self) -> Result<Self> {
        crate::ops::mul(self, other)
    }

    /// Element-wise division with broadcasting.
    pub fn div(&self, other: &Self) -> Result<Self> {
        crate::ops::div(self, other)
    }

    /// Adds a scalar to every element.
    pub fn add_scalar(&self, scalar: T) -> Self {
        crate::ops::map(self, |x| x + scalar)
    }

    /// Multiplies every element by a scalar.
    pub fn mul_scalar(&self, scalar: T) -> Self {
        crate::ops::map(self, |x| x * scalar)
    }

    /// Element-wise square root.
    pub fn sqrt(&self) -> Self {
        crate::ops::map(self, |x| x.sqrt())
    }

    /// Element-wise square.
    pub fn square(&self) -> Self {
        crate::ops::map(self, |x| x * x)
    }

    /// Raises every element to the power `exponent`.
    pub fn powf(&self, exponent: T) -> Self {
        crate::ops::map(self, |x| x.powf(exponent))
    }

    /// Mean along `axis`; `keep_dim` retains the axis with length one.
    pub fn mean_axis(&self, axis: usize, keep_dim: bool) -> Result<Self> {
        crate::ops::mean_axis(self, axis, keep_dim)
    }

    /// Standard deviation along `axis`; `keep_dim` retains the axis with
    /// length one.
    pub fn std_axis(&self, axis: usize, keep_dim: bool) -> Result<Self> {
        crate::ops::std_axis(self, axis, keep_dim)
    }

    /// 2-D matrix multiplication.
    pub fn matmul(&self, other: &Self) -> Result<Self> {
        crate::linalg::matmul(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec() {
        let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
        assert_eq!(t.shape(), &[2, 2]);
        assert_eq!(t.len(), 4);
        assert_eq!(t.ndim(), 2);
    }

    #[test]
    fn test_from_vec_rejects_wrong_length() {
        let result = Tensor::from_vec(vec![1.0, 2.0, 3.0], vec![2, 2]);
        assert!(matches!(
            result,
            Err(NeurustError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_zeros_and_ones() {
        let z: Tensor<f32> = Tensor::zeros(&[3, 2]);
        assert!(z.data().iter().all(|&x| x == 0.0));
        let o: Tensor<f32> = Tensor::ones(&[3, 2]);
        assert!(o.data().iter().all(|&x| x == 1.0));
    }

    #[test]
    fn test_data_mut_overwrites_in_place() {
        let mut t = Tensor::from_vec(vec![1.0, 2.0], vec![2]).unwrap();
        t.data_mut()[0] = 5.0;
        assert_eq!(t.data(), &[5.0, 2.0]);
        assert_eq!(t.shape(), &[2]);
    }
}
