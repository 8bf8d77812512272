//! Split between the lane-width vectorized region and the scalar tail.
//!
//! Every kernel goes through [`LaneSplit`] so there is one tail policy for
//! the whole crate: `[0, batch_end)` is walked in `width`-sized blocks and
//! `[batch_end, len)` one element at a time, in index order.

use std::iter::StepBy;
use std::ops::Range;

use super::probe::LaneWidth;

/// End of the vectorizable region for a buffer of `total_length` elements.
///
/// A `lane_width` of 0 is treated as 1. When `lane_width > total_length`
/// the vectorized region is empty and the whole input is tail.
#[inline]
pub const fn batch_end(total_length: usize, lane_width: usize) -> usize {
    let width = if lane_width == 0 { 1 } else { lane_width };
    total_length - (total_length % width)
}

/// Boundaries of one buffer split into lane blocks and a tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneSplit {
    len: usize,
    width: usize,
    batch_end: usize,
}

impl LaneSplit {
    /// Split a buffer of `len` elements at lane width `width`.
    #[inline]
    pub const fn new(len: usize, width: LaneWidth) -> Self {
        let width = width.get();
        Self {
            len,
            width,
            batch_end: batch_end(len, width),
        }
    }

    /// Total buffer length.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True when the buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Lane width used for the split.
    #[inline]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// First index of the tail.
    #[inline]
    pub const fn batch_end(&self) -> usize {
        self.batch_end
    }

    /// Number of full lane blocks.
    #[inline]
    pub const fn blocks(&self) -> usize {
        self.batch_end / self.width
    }

    /// Index range processed in lane blocks.
    #[inline]
    pub fn vectorized(&self) -> Range<usize> {
        0..self.batch_end
    }

    /// Index range processed one element at a time.
    #[inline]
    pub fn tail(&self) -> Range<usize> {
        self.batch_end..self.len
    }

    /// Start index of every full lane block.
    #[inline]
    pub fn block_starts(&self) -> StepBy<Range<usize>> {
        self.vectorized().step_by(self.width)
    }

    /// Borrow `values` as (vectorized, tail).
    ///
    /// `values` must have the length the split was built for.
    #[inline]
    pub fn split_slice<'a, T>(&self, values: &'a [T]) -> (&'a [T], &'a [T]) {
        debug_assert_eq!(values.len(), self.len);
        values.split_at(self.batch_end)
    }

    /// Mutable variant of [`split_slice`](Self::split_slice).
    #[inline]
    pub fn split_slice_mut<'a, T>(&self, values: &'a mut [T]) -> (&'a mut [T], &'a mut [T]) {
        debug_assert_eq!(values.len(), self.len);
        values.split_at_mut(self.batch_end)
    }
}
