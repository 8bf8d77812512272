//! Runtime capability probe for hardware lane width.
//!
//! The widest vector register available to this process is detected once and
//! cached in a `OnceLock`. Lane width for an element type is the register
//! width divided by the element width.

use std::fmt;
use std::sync::OnceLock;

/// Widest lane width any kernel accumulates over (512-bit registers of f32).
pub const MAX_LANES: usize = 16;

/// Register width in bits, probed once per process.
static REGISTER_BITS: OnceLock<usize> = OnceLock::new();

mod sealed {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Element type tag for the capability probe.
pub trait LaneElement: sealed::Sealed + Copy + Send + Sync + 'static {
    /// Width of one element in bits.
    const BITS: usize;
    /// Short type name used in log output.
    const NAME: &'static str;
}

impl LaneElement for f32 {
    const BITS: usize = 32;
    const NAME: &'static str = "f32";
}

impl LaneElement for f64 {
    const BITS: usize = 64;
    const NAME: &'static str = "f64";
}

/// Number of elements processed per hardware-width step.
///
/// Always in `1..=MAX_LANES`. A width of 1 means no acceleration: kernels run
/// their scalar path and produce the same results up to summation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LaneWidth(usize);

impl LaneWidth {
    /// Scalar fallback width.
    pub const SCALAR: LaneWidth = LaneWidth(1);

    /// Create a lane width, rejecting 0 and anything above [`MAX_LANES`].
    pub const fn new(width: usize) -> Option<Self> {
        if width == 0 || width > MAX_LANES {
            None
        } else {
            Some(Self(width))
        }
    }

    /// Raw width value.
    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }

    /// True for the width-1 scalar path.
    #[inline]
    pub const fn is_scalar(self) -> bool {
        self.0 == 1
    }

    fn from_register_bits<T: LaneElement>(register_bits: usize) -> Self {
        let lanes = (register_bits / T::BITS).clamp(1, MAX_LANES);
        Self(lanes)
    }
}

impl Default for LaneWidth {
    fn default() -> Self {
        Self::SCALAR
    }
}

impl fmt::Display for LaneWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Width in bits of the widest vector register usable by this process.
///
/// Returns 0 when no vector extension is detected. Memoized: detection runs
/// once, concurrent first callers all observe the same value.
pub fn probe_register_bits() -> usize {
    *REGISTER_BITS.get_or_init(|| {
        let bits = detect_register_bits();
        tracing::debug!(register_bits = bits, "probed vector register width");
        bits
    })
}

/// Lane width for element type `T` on this machine.
///
/// Never fails; yields [`LaneWidth::SCALAR`] when no acceleration exists.
///
/// # Example
///
/// ```
/// use context_graph_kernels::probe_lane_width;
///
/// let width = probe_lane_width::<f32>();
/// assert!(width.get() >= 1);
/// ```
pub fn probe_lane_width<T: LaneElement>() -> LaneWidth {
    LaneWidth::from_register_bits::<T>(probe_register_bits())
}

#[cfg(target_arch = "x86_64")]
fn detect_register_bits() -> usize {
    if is_x86_feature_detected!("avx512f") {
        512
    } else if is_x86_feature_detected!("avx2") {
        256
    } else if is_x86_feature_detected!("sse2") {
        128
    } else {
        0
    }
}

#[cfg(target_arch = "aarch64")]
fn detect_register_bits() -> usize {
    if std::arch::is_aarch64_feature_detected!("neon") {
        128
    } else {
        0
    }
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
fn detect_register_bits() -> usize {
    0
}

/// Whether the explicit AVX2 kernels may run.
#[cfg(target_arch = "x86_64")]
pub(crate) fn avx2_available() -> bool {
    static AVX2: OnceLock<bool> = OnceLock::new();
    *AVX2.get_or_init(|| is_x86_feature_detected!("avx2"))
}
