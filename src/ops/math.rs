//! Mathematical functions for tensors.

use crate::{
    error::{NeurustError, Result},
    tensor::Tensor,
};
use num_traits::Float;

/// Applies `f` to every element, producing a new tensor of the same shape.
pub fn map<T, F>(tensor: &Tensor<T>, f: F) -> Tensor<T>
where
    T: Float,
    F: Fn(T) -> T,
{
    Tensor {
        data: tensor.data().iter().map(|&x| f(x)).collect(),
        shape: tensor.shape().to_vec(),
    }
}

/// Element-wise logistic sigmoid, `1 / (1 + exp(-x))`.
pub fn sigmoid<T: Float>(tensor: &Tensor<T>) -> Tensor<T> {
    let one = T::one();
    map(tensor, |x| one / (one + (-x).exp()))
}

/// Element-wise rectified linear unit, `max(0, x)`.
pub fn relu<T: Float>(tensor: &Tensor<T>) -> Tensor<T> {
    let zero = T::zero();
    map(tensor, |x| if x > zero { x } else { zero })
}

/// Softmax over the last axis, with the row maximum subtracted before
/// exponentiation to keep the exponentials bounded.
pub fn softmax<T: Float>(tensor: &Tensor<T>) -> Result<Tensor<T>> {
    if tensor.ndim() == 0 {
        return Err(NeurustError::InvalidAxis(0, 0));
    }
    if tensor.is_empty() {
        return Ok(tensor.clone());
    }
    let row_len = tensor.shape()[tensor.ndim() - 1];
    let mut data = Vec::with_capacity(tensor.len());
    for row in tensor.data().chunks(row_len) {
        let max = row
            .iter()
            .fold(T::neg_infinity(), |m, &x| if x > m { x } else { m });
        let exps: Vec<T> = row.iter().map(|&x| (x - max).exp()).collect();
        let sum = exps.iter().fold(T::zero(), |acc, &e| acc + e);
        data.extend(exps.into_iter().map(|e| e / sum));
    }
    Tensor::from_vec(data, tensor.shape().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_map() {
        let t = Tensor::from_vec(vec![1.0, 4.0, 9.0], vec![3]).unwrap();
        let r = map(&t, |x: f64| x.sqrt());
        assert_eq!(r.data(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_sigmoid_midpoint() {
        let t = Tensor::from_vec(vec![0.0_f64], vec![1]).unwrap();
        assert_relative_eq!(sigmoid(&t).data()[0], 0.5);
    }

    #[test]
    fn test_relu_clamps_negatives() {
        let t = Tensor::from_vec(vec![-1.0, 0.0, 2.0], vec![3]).unwrap();
        assert_eq!(relu(&t).data(), &[0.0, 0.0, 2.0]);
    }

    #[test]
    fn test_softmax_rows_sum_to_one() {
        let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 10.0, 10.0, 10.0], vec![2, 3]).unwrap();
        let s = softmax(&t).unwrap();
        for row in s.data().chunks(3) {
            let sum: f64 = row.iter().sum();
            assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
        }
        // Uniform row stays uniform
        for &v in &s.data()[3..] {
            assert_relative_eq!(v, 1.0 / 3.0, epsilon = 1e-12);
        }
    }
}
