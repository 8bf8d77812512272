//! Cosine similarity over raw buffers.

use crate::error::KernelResult;
use crate::lanes::{probe_lane_width, LaneWidth};
use crate::reduction::{dot_and_magnitudes_with, fold_pairs, in_normal_range, max_abs};

/// Calculate cosine similarity between two dense vectors.
///
/// Returns a value in [-1.0, 1.0] where 1.0 means identical direction,
/// 0.0 means orthogonal, and -1.0 means opposite direction. If either vector
/// has zero magnitude the result is exactly 0.0.
///
/// Dot product and both magnitudes come from a single fused pass at the
/// probed lane width. Finite vectors whose squared magnitudes overflow or
/// underflow are rescaled by their largest element and still land in range.
///
/// # Errors
/// - `KernelError::DimensionMismatch` if the lengths differ
///
/// # Example
/// ```
/// use context_graph_kernels::cosine_similarity;
///
/// let sim = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
/// assert_eq!(sim, 0.0);
/// let zero = cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]).unwrap();
/// assert_eq!(zero, 0.0);
/// ```
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> KernelResult<f32> {
    cosine_similarity_with(a, b, probe_lane_width::<f32>())
}

/// Cosine similarity at an explicit lane width.
///
/// # Errors
/// - `KernelError::DimensionMismatch` if the lengths differ
pub fn cosine_similarity_with(a: &[f32], b: &[f32], width: LaneWidth) -> KernelResult<f32> {
    let fused = dot_and_magnitudes_with(a, b, width)?;
    let well_scaled = in_normal_range(fused.magnitude_squared_a)
        && in_normal_range(fused.magnitude_squared_b)
        && fused.dot.is_finite();
    if well_scaled {
        Ok(finish_cosine(fused.dot, fused.magnitude_a(), fused.magnitude_b()))
    } else {
        Ok(rescaled_cosine(a, b, width))
    }
}

/// Combine a dot product with two magnitudes.
///
/// Zero magnitude on either side yields 0.0. The quotient is clamped to
/// [-1.0, 1.0] to absorb rounding; NaN inputs stay NaN.
#[inline]
pub(crate) fn finish_cosine(dot: f32, magnitude_a: f32, magnitude_b: f32) -> f32 {
    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }
    (dot / (magnitude_a * magnitude_b)).clamp(-1.0, 1.0)
}

/// Cosine over elements divided by each buffer's largest magnitude.
///
/// Every scaled element lies in [-1, 1] and the largest is exactly 1, so
/// neither sum of squares can overflow or fall below 1.
pub(crate) fn rescaled_cosine(a: &[f32], b: &[f32], width: LaneWidth) -> f32 {
    let scale_a = max_abs(a);
    let scale_b = max_abs(b);
    if scale_a == 0.0 || scale_b == 0.0 {
        return 0.0;
    }
    let dot = fold_pairs(a, b, width, move |x, y| (x / scale_a) * (y / scale_b));
    let sum_sq_a = fold_pairs(a, a, width, move |x, _| {
        let s = x / scale_a;
        s * s
    });
    let sum_sq_b = fold_pairs(b, b, width, move |x, _| {
        let s = x / scale_b;
        s * s
    });
    finish_cosine(dot, sum_sq_a.sqrt(), sum_sq_b.sqrt())
}
