//! In-place normalization kernels.
//!
//! - `minmax`: linear map from one value range to another
//! - `zscore`: two-pass mean / deviation standardization with epsilon guard
//! - `l2`: scale to unit Euclidean length, no-op on the zero vector
//! - `impute`: branch-free NaN replacement via masked select
//!
//! All kernels mutate caller-owned buffers without allocating and walk them
//! through the crate-wide lane split.

mod impute;
mod l2;
mod minmax;
#[cfg(target_arch = "x86_64")]
mod simd;
mod zscore;

pub use impute::{
    impute_nan, impute_nan_with, impute_nan_with_mean, impute_nan_with_mean_with, nan_mean,
    nan_mean_with,
};
pub use l2::{normalize_l2, normalize_l2_with};
pub use minmax::{normalize_minmax, normalize_minmax_with, ValueRange};
pub use zscore::{
    standardize_zscore, standardize_zscore_with, zscore_stats, zscore_stats_with, ZScoreStats,
};

use crate::lanes::{LaneSplit, LaneWidth};

/// Apply `f` to every element, lane block by lane block, then the tail.
#[inline]
pub(crate) fn map_in_place<F>(values: &mut [f32], width: LaneWidth, f: F)
where
    F: Fn(f32) -> f32,
{
    let split = LaneSplit::new(values.len(), width);
    let (blocks, tail) = split.split_slice_mut(values);
    for block in blocks.chunks_exact_mut(split.width()) {
        for x in block.iter_mut() {
            *x = f(*x);
        }
    }
    for x in tail.iter_mut() {
        *x = f(*x);
    }
}
