//! Sliding-window operations along the channel axis.

use crate::{
    error::{NeurustError, Result},
    tensor::Tensor,
};
use num_traits::Float;

/// Sums a `width`-wide window centred at every position of the channel axis
/// (axis 1), zero-padding `width / 2` positions past each edge.
///
/// The input must have rank at least 2; trailing axes are treated as
/// spatial and carried through unchanged, so the output shape equals the
/// input shape.
///
/// # Errors
///
/// Returns an error for rank < 2 input or an even `width` (a centred
/// window needs an odd width).
pub fn sliding_window_sum<T: Float>(tensor: &Tensor<T>, width: usize) -> Result<Tensor<T>> {
    let shape = tensor.shape();
    if shape.len() < 2 {
        return Err(NeurustError::InvalidAxis(1, shape.len()));
    }
    if width % 2 == 0 {
        return Err(NeurustError::InvalidConfiguration(format!(
            "sliding window width must be odd, got {width}"
        )));
    }
    let batch = shape[0];
    let channels = shape[1];
    let inner: usize = shape[2..].iter().product();
    let half = width / 2;

    let mut data = Vec::with_capacity(tensor.len());
    for b in 0..batch {
        for c in 0..channels {
            // Window clamped to the channel range; positions past the edge
            // contribute zero and are simply skipped.
            let lo = c.saturating_sub(half);
            let hi = (c + half + 1).min(channels);
            for i in 0..inner {
                let mut sum = T::zero();
                for w in lo..hi {
                    sum = sum + tensor.data()[(b * channels + w) * inner + i];
                }
                data.push(sum);
            }
        }
    }
    Tensor::from_vec(data, shape.to_vec())
}
