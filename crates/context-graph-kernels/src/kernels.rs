//! Configured kernel context.
//!
//! The free functions at the crate root run at the probed lane width with
//! default constants. `Kernels` pins those choices once from a
//! [`KernelConfig`] and exposes the same operations as methods.

use crate::config::KernelConfig;
use crate::error::{KernelError, KernelResult};
use crate::lanes::{probe_lane_width, LaneWidth};
use crate::normalize::{self, ValueRange, ZScoreStats};
use crate::reduction::{self, FusedReduction};
use crate::similarity::{self, CachedEmbedding, Neighbor};

/// Kernel entry points bound to one lane width and set of constants.
///
/// Cheap to copy; holds no buffers and no state beyond its settings.
///
/// # Example
///
/// ```
/// use context_graph_kernels::{KernelConfig, Kernels};
///
/// let kernels = Kernels::from_config(&KernelConfig::scalar_only()).unwrap();
/// assert!(kernels.lane_width().is_scalar());
/// assert_eq!(kernels.dot_product(&[1.0, 2.0], &[3.0, 4.0]).unwrap(), 11.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernels {
    lane_width: LaneWidth,
    zscore_epsilon: f32,
    parallel_threshold: usize,
}

impl Default for Kernels {
    fn default() -> Self {
        Self::detected()
    }
}

impl Kernels {
    /// Context at the probed lane width with default constants.
    pub fn detected() -> Self {
        let defaults = KernelConfig::default();
        Self {
            lane_width: probe_lane_width::<f32>(),
            zscore_epsilon: defaults.zscore_epsilon,
            parallel_threshold: defaults.parallel_threshold,
        }
    }

    /// Build a context from validated configuration.
    ///
    /// # Errors
    /// - `KernelError::ConfigError` if the configuration fails validation
    pub fn from_config(config: &KernelConfig) -> KernelResult<Self> {
        config.validate()?;

        let probed = probe_lane_width::<f32>();
        let lane_width = match config.lane_width {
            Some(width) => LaneWidth::new(width).ok_or_else(|| KernelError::ConfigError {
                message: format!("lane_width {} is out of range", width),
            })?,
            None => probed,
        };

        tracing::debug!(
            lane_width = lane_width.get(),
            probed = probed.get(),
            overridden = config.lane_width.is_some(),
            zscore_epsilon = config.zscore_epsilon,
            parallel_threshold = config.parallel_threshold,
            "kernel context configured"
        );

        Ok(Self {
            lane_width,
            zscore_epsilon: config.zscore_epsilon,
            parallel_threshold: config.parallel_threshold,
        })
    }

    /// Effective lane width.
    #[inline]
    pub fn lane_width(&self) -> LaneWidth {
        self.lane_width
    }

    /// Effective z-score epsilon.
    #[inline]
    pub fn zscore_epsilon(&self) -> f32 {
        self.zscore_epsilon
    }

    /// Corpus size at which batch similarity goes parallel.
    #[inline]
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// See [`crate::dot_product`].
    pub fn dot_product(&self, a: &[f32], b: &[f32]) -> KernelResult<f32> {
        reduction::dot_product_with(a, b, self.lane_width)
    }

    /// See [`crate::magnitude`].
    pub fn magnitude(&self, a: &[f32]) -> f32 {
        reduction::magnitude_with(a, self.lane_width)
    }

    /// See [`crate::magnitude_squared`].
    pub fn magnitude_squared(&self, a: &[f32]) -> f32 {
        reduction::magnitude_squared_with(a, self.lane_width)
    }

    /// See [`crate::dot_and_magnitudes_with`].
    pub fn dot_and_magnitudes(&self, a: &[f32], b: &[f32]) -> KernelResult<FusedReduction> {
        reduction::dot_and_magnitudes_with(a, b, self.lane_width)
    }

    /// See [`crate::cosine_similarity`].
    pub fn cosine_similarity(&self, a: &[f32], b: &[f32]) -> KernelResult<f32> {
        similarity::cosine_similarity_with(a, b, self.lane_width)
    }

    /// Cache `values` with its magnitude at this context's lane width.
    pub fn cache<'a>(&self, values: &'a [f32]) -> CachedEmbedding<'a> {
        CachedEmbedding::with_lane_width(values, self.lane_width)
    }

    /// See [`crate::cosine_similarity_cached`].
    pub fn cosine_similarity_cached(
        &self,
        a: &CachedEmbedding<'_>,
        b: &CachedEmbedding<'_>,
    ) -> KernelResult<f32> {
        similarity::cosine_similarity_cached_with(a, b, self.lane_width)
    }

    /// See [`crate::cosine_similarity_many`]; parallel at or above the
    /// configured threshold.
    pub fn cosine_similarity_many(
        &self,
        query: &CachedEmbedding<'_>,
        corpus: &[CachedEmbedding<'_>],
    ) -> KernelResult<Vec<f32>> {
        similarity::score_corpus(query, corpus, self.lane_width, self.parallel_threshold)
    }

    /// See [`crate::nearest_neighbors`].
    pub fn nearest_neighbors(
        &self,
        query: &CachedEmbedding<'_>,
        corpus: &[CachedEmbedding<'_>],
        k: usize,
    ) -> KernelResult<Vec<Neighbor>> {
        let scores = self.cosine_similarity_many(query, corpus)?;
        Ok(similarity::rank(scores, k))
    }

    /// See [`crate::normalize_minmax`].
    pub fn normalize_minmax(
        &self,
        values: &mut [f32],
        in_range: ValueRange,
        out_range: ValueRange,
    ) -> KernelResult<()> {
        normalize::normalize_minmax_with(values, in_range, out_range, self.lane_width)
    }

    /// See [`crate::zscore_stats`].
    pub fn zscore_stats(&self, values: &[f32]) -> Option<ZScoreStats> {
        normalize::zscore_stats_with(values, self.lane_width)
    }

    /// See [`crate::standardize_zscore`]; uses the configured epsilon.
    pub fn standardize_zscore(&self, values: &mut [f32]) {
        normalize::standardize_zscore_with(values, self.lane_width, self.zscore_epsilon);
    }

    /// See [`crate::normalize_l2`].
    pub fn normalize_l2(&self, values: &mut [f32]) -> f32 {
        normalize::normalize_l2_with(values, self.lane_width)
    }

    /// See [`crate::impute_nan`].
    pub fn impute_nan(&self, values: &mut [f32], replacement: f32) -> usize {
        normalize::impute_nan_with(values, replacement, self.lane_width)
    }

    /// See [`crate::impute_nan_with_mean`].
    pub fn impute_nan_with_mean(&self, values: &mut [f32]) -> usize {
        normalize::impute_nan_with_mean_with(values, self.lane_width)
    }

    /// See [`crate::nan_mean`].
    pub fn nan_mean(&self, values: &[f32]) -> Option<f32> {
        normalize::nan_mean_with(values, self.lane_width)
    }
}
