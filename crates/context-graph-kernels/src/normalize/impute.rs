//! NaN imputation with a branch-free masked select.
//!
//! Lane blocks build an "ordered" mask from the self-equality test
//! (`x == x` is false exactly for NaN) and select between the element and the
//! replacement with bit arithmetic. Only the scalar tail branches.

use crate::lanes::{probe_lane_width, LaneSplit, LaneWidth};
use crate::reduction::fold_pairs;

/// All-ones when `x` is not NaN, zero otherwise.
#[inline(always)]
#[allow(clippy::eq_op)]
pub(crate) fn ordered_mask(x: f32) -> u32 {
    ((x == x) as u32).wrapping_neg()
}

/// Bitwise select: `keep` where `mask` is set, `other` elsewhere.
#[inline(always)]
pub(crate) fn select(mask: u32, keep: f32, other: f32) -> f32 {
    f32::from_bits((keep.to_bits() & mask) | (other.to_bits() & !mask))
}

/// Replace every NaN with `replacement` in place.
///
/// Returns the number of replaced elements.
///
/// # Example
/// ```
/// use context_graph_kernels::impute_nan;
///
/// let mut v = [1.0, f32::NAN, 3.0];
/// assert_eq!(impute_nan(&mut v, 2.0), 1);
/// assert_eq!(v, [1.0, 2.0, 3.0]);
/// ```
#[inline]
pub fn impute_nan(values: &mut [f32], replacement: f32) -> usize {
    impute_nan_with(values, replacement, probe_lane_width::<f32>())
}

/// NaN imputation at an explicit lane width.
pub fn impute_nan_with(values: &mut [f32], replacement: f32, width: LaneWidth) -> usize {
    #[cfg(target_arch = "x86_64")]
    let replaced = if width.get() == super::simd::LANES && crate::lanes::avx2_available() {
        // SAFETY: AVX2 support verified at runtime above.
        unsafe { super::simd::impute_nan_avx2(values, replacement) }
    } else {
        impute_portable(values, replacement, width)
    };
    #[cfg(not(target_arch = "x86_64"))]
    let replaced = impute_portable(values, replacement, width);

    if replaced > 0 {
        tracing::trace!(replaced, len = values.len(), "imputed NaN values");
    }
    replaced
}

fn impute_portable(values: &mut [f32], replacement: f32, width: LaneWidth) -> usize {
    let split = LaneSplit::new(values.len(), width);
    let (blocks, tail) = split.split_slice_mut(values);
    let mut replaced = 0usize;
    for block in blocks.chunks_exact_mut(split.width()) {
        for x in block.iter_mut() {
            let mask = ordered_mask(*x);
            replaced += (mask == 0) as usize;
            *x = select(mask, *x, replacement);
        }
    }
    for x in tail.iter_mut() {
        if x.is_nan() {
            *x = replacement;
            replaced += 1;
        }
    }
    replaced
}

/// Mean of the non-NaN elements at the probed lane width.
///
/// `None` when the buffer holds no non-NaN element.
#[inline]
pub fn nan_mean(values: &[f32]) -> Option<f32> {
    nan_mean_with(values, probe_lane_width::<f32>())
}

/// Mean of the non-NaN elements at an explicit lane width.
pub fn nan_mean_with(values: &[f32], width: LaneWidth) -> Option<f32> {
    let count = values.iter().filter(|x| !x.is_nan()).count();
    if count == 0 {
        return None;
    }
    let sum = fold_pairs(values, values, width, |x, _| select(ordered_mask(x), x, 0.0));
    Some(sum / count as f32)
}

/// Replace every NaN with the mean of the non-NaN elements.
///
/// All-NaN (or empty) input is left unchanged and 0 is returned.
#[inline]
pub fn impute_nan_with_mean(values: &mut [f32]) -> usize {
    impute_nan_with_mean_with(values, probe_lane_width::<f32>())
}

/// Mean imputation with both passes at an explicit lane width.
pub fn impute_nan_with_mean_with(values: &mut [f32], width: LaneWidth) -> usize {
    match nan_mean_with(values, width) {
        Some(mean) => impute_nan_with(values, mean, width),
        None => {
            tracing::trace!(len = values.len(), "no finite mean to impute with");
            0
        }
    }
}
