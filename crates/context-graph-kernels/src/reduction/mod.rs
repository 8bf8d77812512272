//! Reduction kernels: dot product and sum of squares.
//!
//! Every reduction walks the buffer through the crate-wide lane split and
//! produces one scalar with a fixed accumulation order, so a given input and
//! lane width always yields the same bits.
//!
//! # Dispatch
//!
//! | Lane width | Path |
//! |------------|------|
//! | 8 on x86_64 with AVX2 | `std::arch` AVX2 kernel |
//! | 4, 8, 16   | monomorphized portable kernel |
//! | other      | portable kernel with a `MAX_LANES` accumulator |
//!
//! NaN and infinity are not rejected; they propagate into the result.
//!
//! Magnitudes of finite input stay finite: when the plain sum of squares
//! leaves the normal `f32` range it is recomputed over elements divided by
//! `max|x|`, the same rescaling BLAS `snrm2` applies.

mod portable;
#[cfg(target_arch = "x86_64")]
mod simd;

use crate::error::{ensure_same_len, KernelResult};
use crate::lanes::{probe_lane_width, LaneWidth};

pub(crate) use portable::fold_pairs;

/// Dot product and both squared magnitudes from a single pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FusedReduction {
    /// Sum of pairwise products.
    pub dot: f32,
    /// Sum of squares of the first buffer.
    pub magnitude_squared_a: f32,
    /// Sum of squares of the second buffer.
    pub magnitude_squared_b: f32,
}

impl FusedReduction {
    /// Euclidean magnitude of the first buffer.
    ///
    /// Square root of the unscaled sum, so infinite if that sum overflowed.
    #[inline]
    pub fn magnitude_a(&self) -> f32 {
        self.magnitude_squared_a.sqrt()
    }

    /// Euclidean magnitude of the second buffer.
    #[inline]
    pub fn magnitude_b(&self) -> f32 {
        self.magnitude_squared_b.sqrt()
    }
}

/// Calculate the dot product of two equal-length buffers.
///
/// Uses the probed lane width for `f32`.
///
/// # Errors
/// - `KernelError::DimensionMismatch` if the lengths differ
///
/// # Example
/// ```
/// use context_graph_kernels::dot_product;
///
/// let dot = dot_product(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap();
/// assert_eq!(dot, 32.0);
/// ```
#[inline]
pub fn dot_product(a: &[f32], b: &[f32]) -> KernelResult<f32> {
    dot_product_with(a, b, probe_lane_width::<f32>())
}

/// Dot product at an explicit lane width.
///
/// # Errors
/// - `KernelError::DimensionMismatch` if the lengths differ
pub fn dot_product_with(a: &[f32], b: &[f32], width: LaneWidth) -> KernelResult<f32> {
    ensure_same_len(a.len(), b.len())?;
    Ok(dot_unchecked(a, b, width))
}

/// Sum of squares (squared Euclidean magnitude) at the probed lane width.
#[inline]
pub fn magnitude_squared(a: &[f32]) -> f32 {
    magnitude_squared_with(a, probe_lane_width::<f32>())
}

/// Sum of squares at an explicit lane width.
///
/// Enough for ordering by length; skips the square root. Unlike
/// [`magnitude_with`] this is not rescaled and overflows to infinity once
/// the true sum passes `f32::MAX`.
pub fn magnitude_squared_with(a: &[f32], width: LaneWidth) -> f32 {
    #[cfg(target_arch = "x86_64")]
    {
        if width.get() == simd::LANES && crate::lanes::avx2_available() {
            // SAFETY: AVX2 support verified at runtime above.
            return unsafe { simd::sum_squares_avx2(a) };
        }
    }
    fold_pairs(a, a, width, |x, _| x * x)
}

/// Euclidean magnitude at the probed lane width. Never negative.
///
/// # Example
/// ```
/// use context_graph_kernels::magnitude;
///
/// assert_eq!(magnitude(&[3.0, 4.0]), 5.0);
/// ```
#[inline]
pub fn magnitude(a: &[f32]) -> f32 {
    magnitude_with(a, probe_lane_width::<f32>())
}

/// Euclidean magnitude at an explicit lane width.
///
/// Finite input yields a finite magnitude even when the sum of squares would
/// overflow or underflow.
#[inline]
pub fn magnitude_with(a: &[f32], width: LaneWidth) -> f32 {
    magnitude_parts(a, width).0
}

/// Magnitude plus whether the plain sum of squares was in the normal range.
///
/// When the flag is true the magnitude is exactly `magnitude_squared.sqrt()`.
pub(crate) fn magnitude_parts(a: &[f32], width: LaneWidth) -> (f32, bool) {
    let sum_sq = magnitude_squared_with(a, width);
    if in_normal_range(sum_sq) {
        (sum_sq.sqrt(), true)
    } else {
        (rescaled_magnitude(a, sum_sq, width), false)
    }
}

/// True for a finite sum of squares at or above `f32::MIN_POSITIVE`.
#[inline]
pub(crate) fn in_normal_range(sum_sq: f32) -> bool {
    sum_sq >= f32::MIN_POSITIVE && sum_sq.is_finite()
}

/// Largest absolute element, ignoring NaN. Zero for empty input.
pub(crate) fn max_abs(a: &[f32]) -> f32 {
    a.iter().fold(0.0f32, |m, &x| m.max(x.abs()))
}

fn rescaled_magnitude(a: &[f32], sum_sq: f32, width: LaneWidth) -> f32 {
    let scale = max_abs(a);
    if scale == 0.0 || scale.is_infinite() {
        // Zero vector, or infinite elements that no scaling can help.
        return sum_sq.sqrt();
    }
    let scaled = fold_pairs(a, a, width, move |x, _| {
        let s = x / scale;
        s * s
    });
    scale * scaled.sqrt()
}

/// Dot product plus both sums of squares in one pass.
///
/// Each component equals the corresponding standalone reduction at the same
/// lane width.
///
/// # Errors
/// - `KernelError::DimensionMismatch` if the lengths differ
pub fn dot_and_magnitudes_with(
    a: &[f32],
    b: &[f32],
    width: LaneWidth,
) -> KernelResult<FusedReduction> {
    ensure_same_len(a.len(), b.len())?;
    Ok(fused_unchecked(a, b, width))
}

/// Dot product without the length check. Caller ensures equal lengths.
#[inline]
pub(crate) fn dot_unchecked(a: &[f32], b: &[f32], width: LaneWidth) -> f32 {
    #[cfg(target_arch = "x86_64")]
    {
        if width.get() == simd::LANES && crate::lanes::avx2_available() {
            // SAFETY: AVX2 support verified at runtime above; the kernel only
            // reads the common prefix of both slices.
            return unsafe { simd::dot_avx2(a, b) };
        }
    }
    fold_pairs(a, b, width, |x, y| x * y)
}

#[inline]
fn fused_unchecked(a: &[f32], b: &[f32], width: LaneWidth) -> FusedReduction {
    #[cfg(target_arch = "x86_64")]
    let sums = if width.get() == simd::LANES && crate::lanes::avx2_available() {
        // SAFETY: AVX2 support verified at runtime above.
        unsafe { simd::fused_avx2(a, b) }
    } else {
        portable::fold_fused(a, b, width)
    };
    #[cfg(not(target_arch = "x86_64"))]
    let sums = portable::fold_fused(a, b, width);

    FusedReduction {
        dot: sums[0],
        magnitude_squared_a: sums[1],
        magnitude_squared_b: sums[2],
    }
}

/// Plain sum of all elements.
#[inline]
pub(crate) fn sum_with(values: &[f32], width: LaneWidth) -> f32 {
    fold_pairs(values, values, width, |x, _| x)
}

/// Sum of `x - mean`, used to correct a rounded mean.
#[inline]
pub(crate) fn deviation_sum_with(values: &[f32], mean: f32, width: LaneWidth) -> f32 {
    fold_pairs(values, values, width, move |x, _| x - mean)
}

/// Sum of `(x - mean)^2`, the second pass of a two-pass variance.
#[inline]
pub(crate) fn squared_deviation_sum_with(values: &[f32], mean: f32, width: LaneWidth) -> f32 {
    fold_pairs(values, values, width, move |x, _| {
        let d = x - mean;
        d * d
    })
}
