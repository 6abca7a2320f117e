//! Dropout layer.

use crate::{
    error::{NeurustError, Result},
    nn::Layer,
    tensor::Tensor,
};
use num_traits::Float;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Inverted dropout.
///
/// During training each element is zeroed with probability `p` and the
/// survivors are scaled by `1 / (1 - p)` so the expected activation is
/// unchanged; inference passes the input through untouched. The layer has
/// no learnable parameters; its only state is the mask generator.
#[derive(Debug)]
pub struct Dropout {
    p: f64,
    seed: u64,
    rng: StdRng,
}

impl Dropout {
    /// Creates a dropout layer with drop probability `p` and an optional
    /// seed for a reproducible mask sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if `p` is outside `[0, 1)`.
    pub fn new(p: f64, seed: Option<u64>) -> Result<Self> {
        if !(0.0..1.0).contains(&p) {
            return Err(NeurustError::InvalidConfiguration(format!(
                "dropout probability must be in [0, 1), got {p}"
            )));
        }
        let seed = seed.unwrap_or_else(rand::random);
        Ok(Self {
            p,
            seed,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// The drop probability.
    pub fn probability(&self) -> f64 {
        self.p
    }

    /// The mask generator seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl<T: Float> Layer<T> for Dropout {
    fn train_fprop(&mut self, input: &Tensor<T>) -> Result<Tensor<T>> {
        if self.p == 0.0 {
            return Ok(input.clone());
        }
        let keep_scale = T::from(1.0 / (1.0 - self.p)).unwrap();
        let data = input
            .data()
            .iter()
            .map(|&x| {
                if self.rng.gen::<f64>() < self.p {
                    T::zero()
                } else {
                    x * keep_scale
                }
            })
            .collect();
        Tensor::from_vec(data, input.shape().to_vec())
    }

    fn test_fprop(&self, input: &Tensor<T>) -> Result<Tensor<T>> {
        Ok(input.clone())
    }

    fn params(&self) -> Vec<&Tensor<T>> {
        Vec::new()
    }

    fn params_mut(&mut self) -> Vec<&mut Tensor<T>> {
        Vec::new()
    }

    fn name(&self) -> &'static str {
        "Dropout"
    }
}
