//! L2 (unit-length) normalization.

use crate::lanes::{probe_lane_width, LaneWidth};
use crate::reduction::magnitude_with;

use super::map_in_place;

/// Normalize a vector to unit length in place.
///
/// Returns the magnitude the vector had before normalization. A zero vector
/// is left unchanged and `0.0` is returned.
///
/// # Example
/// ```
/// use context_graph_kernels::normalize_l2;
///
/// let mut v = [3.0, 4.0];
/// let norm = normalize_l2(&mut v);
/// assert_eq!(norm, 5.0);
/// assert!((v[0] - 0.6).abs() < 1e-6 && (v[1] - 0.8).abs() < 1e-6);
/// ```
#[inline]
pub fn normalize_l2(values: &mut [f32]) -> f32 {
    normalize_l2_with(values, probe_lane_width::<f32>())
}

/// L2 normalization at an explicit lane width.
pub fn normalize_l2_with(values: &mut [f32], width: LaneWidth) -> f32 {
    let norm = magnitude_with(values, width);
    if norm == 0.0 {
        tracing::trace!(len = values.len(), "zero vector left unnormalized");
        return norm;
    }
    map_in_place(values, width, |x| x / norm);
    norm
}
