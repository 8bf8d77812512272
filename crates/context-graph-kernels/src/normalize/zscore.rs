//! Z-score standardization.
//!
//! Pass 1 sums for the mean and a second sum of `x - mean` corrects its
//! rounding, pass 2 sums squared deviations from that mean (never
//! `E[x^2] - E[x]^2`), pass 3 rescales in place. Every sum uses the
//! lane-width reduction order.
//!
//! The correction makes the mean of constant input exactly that constant,
//! so every deviation is zero even when the constant has no exact binary
//! form (`0.1`, `1000.1`).

use crate::config::DEFAULT_ZSCORE_EPSILON;
use crate::lanes::{probe_lane_width, LaneWidth};
use crate::reduction::{deviation_sum_with, squared_deviation_sum_with, sum_with};

use super::map_in_place;

/// Mean and population standard deviation of a buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZScoreStats {
    /// Arithmetic mean
    pub mean: f32,
    /// Population standard deviation (divides by `n`)
    pub std_dev: f32,
}

/// Mean and standard deviation at the probed lane width.
///
/// Returns `None` for an empty buffer.
#[inline]
pub fn zscore_stats(values: &[f32]) -> Option<ZScoreStats> {
    zscore_stats_with(values, probe_lane_width::<f32>())
}

/// Mean and standard deviation at an explicit lane width.
pub fn zscore_stats_with(values: &[f32], width: LaneWidth) -> Option<ZScoreStats> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f32;
    let rough = sum_with(values, width) / n;
    let mean = rough + deviation_sum_with(values, rough, width) / n;
    let variance = squared_deviation_sum_with(values, mean, width) / n;
    Some(ZScoreStats {
        mean,
        std_dev: variance.sqrt(),
    })
}

/// Standardize in place: `(x - mean) / (std_dev + 1e-8)`.
///
/// Never fails. Constant input has zero deviation and becomes all zeros;
/// empty input is left alone.
///
/// # Example
/// ```
/// use context_graph_kernels::standardize_zscore;
///
/// let mut v = [2.0, 2.0, 2.0];
/// standardize_zscore(&mut v);
/// assert_eq!(v, [0.0, 0.0, 0.0]);
/// ```
#[inline]
pub fn standardize_zscore(values: &mut [f32]) {
    standardize_zscore_with(values, probe_lane_width::<f32>(), DEFAULT_ZSCORE_EPSILON);
}

/// Standardize at an explicit lane width and epsilon.
pub fn standardize_zscore_with(values: &mut [f32], width: LaneWidth, epsilon: f32) {
    let Some(stats) = zscore_stats_with(values, width) else {
        return;
    };
    let mean = stats.mean;
    let denom = stats.std_dev + epsilon;
    map_in_place(values, width, |x| (x - mean) / denom);
}
