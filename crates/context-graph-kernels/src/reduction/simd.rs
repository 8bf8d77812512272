//! Explicit AVX2 reductions for x86_64 at lane width 8.
//!
//! Same accumulation order as the portable width-8 path: one multiply then
//! one add per lane (no FMA), lanes stored and summed in index order, tail in
//! index order. Results are bit-identical to `portable::fold_pairs` at width 8.

use std::arch::x86_64::*;

use super::portable::{finish_fused, horizontal_sum};
use crate::lanes::batch_end;

/// Lanes in one 256-bit register of f32.
pub(crate) const LANES: usize = 8;

/// Dot product over the common prefix of `a` and `b`.
///
/// # Safety
/// Caller must ensure AVX2 is available.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn dot_avx2(a: &[f32], b: &[f32]) -> f32 {
    let len = a.len().min(b.len());
    let end = batch_end(len, LANES);
    let mut acc = _mm256_setzero_ps();
    let mut i = 0;
    while i < end {
        let va = _mm256_loadu_ps(a.as_ptr().add(i));
        let vb = _mm256_loadu_ps(b.as_ptr().add(i));
        acc = _mm256_add_ps(acc, _mm256_mul_ps(va, vb));
        i += LANES;
    }
    let mut total = hsum_ordered(acc);
    for j in end..len {
        total += a[j] * b[j];
    }
    total
}

/// Sum of squares of `a`.
///
/// # Safety
/// Caller must ensure AVX2 is available.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn sum_squares_avx2(a: &[f32]) -> f32 {
    let end = batch_end(a.len(), LANES);
    let mut acc = _mm256_setzero_ps();
    let mut i = 0;
    while i < end {
        let va = _mm256_loadu_ps(a.as_ptr().add(i));
        acc = _mm256_add_ps(acc, _mm256_mul_ps(va, va));
        i += LANES;
    }
    let mut total = hsum_ordered(acc);
    for &x in &a[end..] {
        total += x * x;
    }
    total
}

/// Dot product and both sums of squares in one pass.
///
/// # Safety
/// Caller must ensure AVX2 is available.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn fused_avx2(a: &[f32], b: &[f32]) -> [f32; 3] {
    let len = a.len().min(b.len());
    let end = batch_end(len, LANES);
    let mut dot = _mm256_setzero_ps();
    let mut aa = _mm256_setzero_ps();
    let mut bb = _mm256_setzero_ps();
    let mut i = 0;
    while i < end {
        let va = _mm256_loadu_ps(a.as_ptr().add(i));
        let vb = _mm256_loadu_ps(b.as_ptr().add(i));
        dot = _mm256_add_ps(dot, _mm256_mul_ps(va, vb));
        aa = _mm256_add_ps(aa, _mm256_mul_ps(va, va));
        bb = _mm256_add_ps(bb, _mm256_mul_ps(vb, vb));
        i += LANES;
    }
    finish_fused(
        &store_lanes(dot),
        &store_lanes(aa),
        &store_lanes(bb),
        &a[end..len],
        &b[end..len],
    )
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn store_lanes(v: __m256) -> [f32; LANES] {
    let mut lanes = [0.0f32; LANES];
    _mm256_storeu_ps(lanes.as_mut_ptr(), v);
    lanes
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn hsum_ordered(v: __m256) -> f32 {
    horizontal_sum(&store_lanes(v))
}
