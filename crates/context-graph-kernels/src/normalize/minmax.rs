//! Min-max range mapping.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::{KernelError, KernelResult};
use crate::lanes::{probe_lane_width, LaneWidth};

use super::map_in_place;

/// Closed interval `[min, max]` used as a min-max bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    /// Lower bound
    pub min: f32,
    /// Upper bound
    pub max: f32,
}

impl ValueRange {
    /// Create a range. `min > max` is allowed and maps in reverse.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// The unit interval `[0, 1]`.
    pub const fn unit() -> Self {
        Self::new(0.0, 1.0)
    }

    /// `max - min`.
    #[inline]
    pub fn width(&self) -> f32 {
        self.max - self.min
    }

    /// True when the range has zero width.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }
}

impl From<(f32, f32)> for ValueRange {
    fn from((min, max): (f32, f32)) -> Self {
        Self::new(min, max)
    }
}

impl From<RangeInclusive<f32>> for ValueRange {
    fn from(range: RangeInclusive<f32>) -> Self {
        let (min, max) = range.into_inner();
        Self::new(min, max)
    }
}

/// Map every element from `in_range` to `out_range` in place.
///
/// `x -> out.min + ((x - in.min) / (in.max - in.min)) * (out.max - out.min)`.
/// Values outside `in_range` extrapolate linearly; nothing is clamped.
///
/// # Errors
/// - `KernelError::DegenerateRange` if `in_range` has zero width; the buffer
///   is left untouched
///
/// # Example
/// ```
/// use context_graph_kernels::{normalize_minmax, ValueRange};
///
/// let mut v = [0.0, 5.0, 10.0];
/// normalize_minmax(&mut v, ValueRange::new(0.0, 10.0), ValueRange::new(-1.0, 1.0)).unwrap();
/// assert_eq!(v, [-1.0, 0.0, 1.0]);
/// ```
#[inline]
pub fn normalize_minmax(
    values: &mut [f32],
    in_range: ValueRange,
    out_range: ValueRange,
) -> KernelResult<()> {
    normalize_minmax_with(values, in_range, out_range, probe_lane_width::<f32>())
}

/// Min-max mapping at an explicit lane width.
///
/// # Errors
/// - `KernelError::DegenerateRange` if `in_range` has zero width
pub fn normalize_minmax_with(
    values: &mut [f32],
    in_range: ValueRange,
    out_range: ValueRange,
    width: LaneWidth,
) -> KernelResult<()> {
    if in_range.is_degenerate() {
        return Err(KernelError::DegenerateRange {
            min: in_range.min,
            max: in_range.max,
        });
    }

    let in_min = in_range.min;
    let in_width = in_range.width();
    let out_min = out_range.min;
    let out_width = out_range.width();
    map_in_place(values, width, |x| out_min + ((x - in_min) / in_width) * out_width);
    Ok(())
}
