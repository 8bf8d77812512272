//! AVX2 masked select for NaN imputation (x86_64, lane width 8).

use std::arch::x86_64::*;

use crate::lanes::batch_end;

/// Lanes in one 256-bit register of f32.
pub(crate) const LANES: usize = 8;

/// Replace NaN lanes with `replacement`; returns the number replaced.
///
/// Blocks use an ordered compare (`_CMP_ORD_Q`, false only for NaN) and a
/// blend; the tail uses a scalar `is_nan` check.
///
/// # Safety
/// Caller must ensure AVX2 is available.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn impute_nan_avx2(values: &mut [f32], replacement: f32) -> usize {
    let end = batch_end(values.len(), LANES);
    let fill = _mm256_set1_ps(replacement);
    let ptr = values.as_mut_ptr();
    let mut replaced = 0usize;
    let mut i = 0;
    while i < end {
        let v = _mm256_loadu_ps(ptr.add(i));
        let ordered = _mm256_cmp_ps::<_CMP_ORD_Q>(v, v);
        let nan_lanes = !_mm256_movemask_ps(ordered) & 0xFF;
        replaced += nan_lanes.count_ones() as usize;
        _mm256_storeu_ps(ptr.add(i), _mm256_blendv_ps(fill, v, ordered));
        i += LANES;
    }
    for x in values[end..].iter_mut() {
        if x.is_nan() {
            *x = replacement;
            replaced += 1;
        }
    }
    replaced
}
