//! Portable lane-width reductions.
//!
//! Lane `l` accumulates elements `l, l + W, l + 2W, ...` of the vectorized
//! region, the lanes are summed in index order, then the tail is added in
//! index order. Widths 4, 8 and 16 are monomorphized so the inner loop has a
//! fixed trip count; other widths go through a `MAX_LANES` accumulator.

use crate::lanes::{batch_end, LaneWidth, MAX_LANES};

/// Sum of `f(a[i], b[i])` over both buffers at lane width `width`.
///
/// Caller guarantees `a.len() == b.len()`.
#[inline]
pub(crate) fn fold_pairs<F>(a: &[f32], b: &[f32], width: LaneWidth, f: F) -> f32
where
    F: Fn(f32, f32) -> f32,
{
    debug_assert_eq!(a.len(), b.len());
    match width.get() {
        4 => fold_pairs_fixed::<4, F>(a, b, f),
        8 => fold_pairs_fixed::<8, F>(a, b, f),
        16 => fold_pairs_fixed::<16, F>(a, b, f),
        w => fold_pairs_dyn(a, b, w, f),
    }
}

/// Dot product and both sums of squares in one pass.
///
/// Each of the three accumulators follows the same order as [`fold_pairs`],
/// so the results equal three separate reductions exactly.
#[inline]
pub(crate) fn fold_fused(a: &[f32], b: &[f32], width: LaneWidth) -> [f32; 3] {
    debug_assert_eq!(a.len(), b.len());
    match width.get() {
        4 => fold_fused_fixed::<4>(a, b),
        8 => fold_fused_fixed::<8>(a, b),
        16 => fold_fused_fixed::<16>(a, b),
        w => fold_fused_dyn(a, b, w),
    }
}

/// Sum lanes in index order.
#[inline(always)]
pub(crate) fn horizontal_sum(lanes: &[f32]) -> f32 {
    let mut total = 0.0f32;
    for &lane in lanes {
        total += lane;
    }
    total
}

fn fold_pairs_fixed<const W: usize, F>(a: &[f32], b: &[f32], f: F) -> f32
where
    F: Fn(f32, f32) -> f32,
{
    let end = batch_end(a.len(), W);
    let mut acc = [0.0f32; W];
    for (ca, cb) in a[..end].chunks_exact(W).zip(b[..end].chunks_exact(W)) {
        for lane in 0..W {
            acc[lane] += f(ca[lane], cb[lane]);
        }
    }
    finish_pairs(&acc, &a[end..], &b[end..], f)
}

fn fold_pairs_dyn<F>(a: &[f32], b: &[f32], width: usize, f: F) -> f32
where
    F: Fn(f32, f32) -> f32,
{
    let width = width.clamp(1, MAX_LANES);
    let end = batch_end(a.len(), width);
    let mut acc = [0.0f32; MAX_LANES];
    for (ca, cb) in a[..end].chunks_exact(width).zip(b[..end].chunks_exact(width)) {
        for lane in 0..width {
            acc[lane] += f(ca[lane], cb[lane]);
        }
    }
    finish_pairs(&acc[..width], &a[end..], &b[end..], f)
}

#[inline(always)]
fn finish_pairs<F>(lanes: &[f32], tail_a: &[f32], tail_b: &[f32], f: F) -> f32
where
    F: Fn(f32, f32) -> f32,
{
    let mut total = horizontal_sum(lanes);
    for (&x, &y) in tail_a.iter().zip(tail_b) {
        total += f(x, y);
    }
    total
}

fn fold_fused_fixed<const W: usize>(a: &[f32], b: &[f32]) -> [f32; 3] {
    let end = batch_end(a.len(), W);
    let mut dot = [0.0f32; W];
    let mut aa = [0.0f32; W];
    let mut bb = [0.0f32; W];
    for (ca, cb) in a[..end].chunks_exact(W).zip(b[..end].chunks_exact(W)) {
        for lane in 0..W {
            dot[lane] += ca[lane] * cb[lane];
            aa[lane] += ca[lane] * ca[lane];
            bb[lane] += cb[lane] * cb[lane];
        }
    }
    finish_fused(&dot, &aa, &bb, &a[end..], &b[end..])
}

fn fold_fused_dyn(a: &[f32], b: &[f32], width: usize) -> [f32; 3] {
    let width = width.clamp(1, MAX_LANES);
    let end = batch_end(a.len(), width);
    let mut dot = [0.0f32; MAX_LANES];
    let mut aa = [0.0f32; MAX_LANES];
    let mut bb = [0.0f32; MAX_LANES];
    for (ca, cb) in a[..end].chunks_exact(width).zip(b[..end].chunks_exact(width)) {
        for lane in 0..width {
            dot[lane] += ca[lane] * cb[lane];
            aa[lane] += ca[lane] * ca[lane];
            bb[lane] += cb[lane] * cb[lane];
        }
    }
    finish_fused(
        &dot[..width],
        &aa[..width],
        &bb[..width],
        &a[end..],
        &b[end..],
    )
}

#[inline(always)]
pub(crate) fn finish_fused(
    dot: &[f32],
    aa: &[f32],
    bb: &[f32],
    tail_a: &[f32],
    tail_b: &[f32],
) -> [f32; 3] {
    let mut out = [horizontal_sum(dot), horizontal_sum(aa), horizontal_sum(bb)];
    for (&x, &y) in tail_a.iter().zip(tail_b) {
        out[0] += x * y;
        out[1] += x * x;
        out[2] += y * y;
    }
    out
}
