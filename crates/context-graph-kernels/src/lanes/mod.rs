//! Hardware lane width detection and lane-block boundaries.
//!
//! - `probe`: one-time detection of the vector register width
//! - `batch`: split of a buffer into lane blocks and a scalar tail

mod batch;
mod probe;

pub use batch::{batch_end, LaneSplit};
pub use probe::{probe_lane_width, probe_register_bits, LaneElement, LaneWidth, MAX_LANES};

#[cfg(target_arch = "x86_64")]
pub(crate) use probe::avx2_available;
