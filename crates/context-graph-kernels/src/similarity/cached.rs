//! Embeddings paired with their precomputed magnitude.

use crate::error::{ensure_same_len, KernelResult};
use crate::lanes::{probe_lane_width, LaneWidth};
use crate::reduction::{dot_unchecked, magnitude_parts};

use super::cosine::{finish_cosine, rescaled_cosine};

/// A borrowed embedding and its Euclidean magnitude.
///
/// The magnitude is computed once at construction and never again. The value
/// is immutable, `Copy`, and can be shared across threads freely.
///
/// # Example
/// ```
/// use context_graph_kernels::{cosine_similarity_cached, CachedEmbedding};
///
/// let corpus = [vec![1.0, 0.0], vec![0.6, 0.8]];
/// let cached: Vec<_> = corpus.iter().map(|v| CachedEmbedding::new(v)).collect();
/// let query = CachedEmbedding::new(&[1.0, 0.0]);
/// let sim = cosine_similarity_cached(&query, &cached[1]).unwrap();
/// assert!((sim - 0.6).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CachedEmbedding<'a> {
    values: &'a [f32],
    magnitude: f32,
    // False when the magnitude needed rescaling; cosine then rescales too.
    well_scaled: bool,
}

impl<'a> CachedEmbedding<'a> {
    /// Cache `values` with its magnitude at the probed lane width.
    pub fn new(values: &'a [f32]) -> Self {
        Self::with_lane_width(values, probe_lane_width::<f32>())
    }

    /// Cache `values` with its magnitude at an explicit lane width.
    pub fn with_lane_width(values: &'a [f32], width: LaneWidth) -> Self {
        let (magnitude, well_scaled) = magnitude_parts(values, width);
        Self {
            values,
            magnitude,
            well_scaled,
        }
    }

    /// The underlying buffer.
    #[inline]
    pub fn values(&self) -> &'a [f32] {
        self.values
    }

    /// The cached Euclidean magnitude.
    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.magnitude
    }

    /// Embedding dimension.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True for a zero-dimension embedding.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when the magnitude is exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.magnitude == 0.0
    }
}

impl AsRef<[f32]> for CachedEmbedding<'_> {
    fn as_ref(&self) -> &[f32] {
        self.values
    }
}

/// Cosine similarity of two cached embeddings.
///
/// Only the dot product is computed; both magnitudes come from the cache.
///
/// # Errors
/// - `KernelError::DimensionMismatch` if the dimensions differ
pub fn cosine_similarity_cached(
    a: &CachedEmbedding<'_>,
    b: &CachedEmbedding<'_>,
) -> KernelResult<f32> {
    cosine_similarity_cached_with(a, b, probe_lane_width::<f32>())
}

/// Cached cosine similarity with the dot product at an explicit lane width.
///
/// # Errors
/// - `KernelError::DimensionMismatch` if the dimensions differ
pub fn cosine_similarity_cached_with(
    a: &CachedEmbedding<'_>,
    b: &CachedEmbedding<'_>,
    width: LaneWidth,
) -> KernelResult<f32> {
    ensure_same_len(a.len(), b.len())?;
    Ok(cached_cosine_unchecked(a, b, width))
}

/// Cached cosine without the dimension check.
#[inline]
pub(crate) fn cached_cosine_unchecked(
    a: &CachedEmbedding<'_>,
    b: &CachedEmbedding<'_>,
    width: LaneWidth,
) -> f32 {
    if a.is_zero() || b.is_zero() {
        return 0.0;
    }
    if a.well_scaled && b.well_scaled {
        let dot = dot_unchecked(a.values, b.values, width);
        if dot.is_finite() {
            return finish_cosine(dot, a.magnitude, b.magnitude);
        }
    }
    rescaled_cosine(a.values, b.values, width)
}
