//! Weight initialization.
//!
//! Initializers draw in `f64` and convert into the tensor's element type,
//! so a single sampling path serves both `f32` and `f64` networks.

use crate::tensor::Tensor;
use num_traits::Float;
use rand::Rng;
use rand_distr::StandardNormal;

/// Samples a tensor of the given shape from the uniform distribution over
/// `[low, high)`.
///
/// # Panics
///
/// Panics if `low >= high`.
pub fn uniform<T: Float>(shape: &[usize], low: f64, high: f64) -> Tensor<T> {
    assert!(low < high, "lower bound must be less than upper bound");
    let mut rng = rand::thread_rng();
    let size: usize = shape.iter().product();
    let data = (0..size)
        .map(|_| T::from(rng.gen_range(low..high)).unwrap())
        .collect();
    Tensor {
        data,
        shape: shape.to_vec(),
    }
}

/// Samples a tensor of the given shape from a normal distribution with the
/// given mean and standard deviation.
pub fn normal<T: Float>(shape: &[usize], mean: f64, stddev: f64) -> Tensor<T> {
    let mut rng = rand::thread_rng();
    let size: usize = shape.iter().product();
    let data = (0..size)
        .map(|_| {
            let v: f64 = rng.sample(StandardNormal);
            T::from(v * stddev + mean).unwrap()
        })
        .collect();
    Tensor {
        data,
        shape: shape.to_vec(),
    }
}

/// Xavier (Glorot) uniform initialization for a `[fan_in, fan_out]` weight
/// matrix: uniform over `[-bound, bound]` with
/// `bound = sqrt(6 / (fan_in + fan_out))`.
pub fn xavier_uniform<T: Float>(fan_in: usize, fan_out: usize) -> Tensor<T> {
    let bound = (6.0 / (fan_in + fan_out) as f64).sqrt();
    uniform(&[fan_in, fan_out], -bound, bound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_bounds() {
        let t: Tensor<f32> = uniform(&[1000], -1.0, 1.0);
        assert_eq!(t.len(), 1000);
        for &v in t.data() {
            assert!((-1.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_normal_moments() {
        let t: Tensor<f64> = normal(&[10_000], 1.0, 2.0);
        let mean = t.data().iter().sum::<f64>() / t.len() as f64;
        let var = t.data().iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / t.len() as f64;
        assert!((mean - 1.0).abs() < 0.1, "mean={mean}");
        assert!((var - 4.0).abs() < 0.3, "var={var}");
    }

    #[test]
    fn test_xavier_uniform_bounds() {
        let t: Tensor<f64> = xavier_uniform(100, 50);
        assert_eq!(t.shape(), &[100, 50]);
        let bound = (6.0_f64 / 150.0).sqrt();
        for &v in t.data() {
            assert!(v.abs() <= bound);
        }
    }
}
