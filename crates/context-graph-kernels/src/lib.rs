// Numeric kernels index fixed-width lane accumulators in tight loops.
#![allow(clippy::needless_range_loop)]

//! Context Graph Kernels
//!
//! Lane-width batched numeric kernels for dense embeddings: dot product,
//! magnitude, cosine similarity and in-place normalization.
//!
//! # Architecture
//!
//! Components, leaves first:
//! - `lanes`: capability probe (hardware lane width, detected once) and the
//!   lane split shared by every kernel (vectorized blocks + scalar tail)
//! - `reduction`: dot product and sum of squares with a fixed accumulation
//!   order
//! - `similarity`: cosine similarity, `CachedEmbedding` with a magnitude
//!   computed once, nearest-neighbour scoring
//! - `normalize`: min-max, z-score, L2 and NaN imputation
//! - `config` / `Kernels`: TOML-loadable settings bound into a context
//!
//! Kernels borrow caller memory, never allocate on the hot path and hold no
//! state across calls except the memoized probe result. They are safe to call
//! concurrently on disjoint buffers.
//!
//! # Example
//!
//! ```
//! use context_graph_kernels::{cosine_similarity, normalize_l2, standardize_zscore};
//!
//! let a = [1.0, 2.0, 3.0];
//! let b = [2.0, 4.0, 6.0];
//! let sim = cosine_similarity(&a, &b).unwrap();
//! assert!((sim - 1.0).abs() < 1e-6);
//!
//! let mut v = [3.0, 4.0];
//! normalize_l2(&mut v);
//! assert!((v[0] - 0.6).abs() < 1e-6);
//!
//! let mut constant = [2.0, 2.0, 2.0];
//! standardize_zscore(&mut constant);
//! assert_eq!(constant, [0.0, 0.0, 0.0]);
//! ```

pub mod config;
pub mod error;
pub mod lanes;
pub mod normalize;
pub mod reduction;
pub mod similarity;

mod kernels;

// Re-exports for convenience
pub use config::{KernelConfig, DEFAULT_PARALLEL_THRESHOLD, DEFAULT_ZSCORE_EPSILON};
pub use error::{KernelError, KernelResult};
pub use kernels::Kernels;
pub use lanes::{batch_end, probe_lane_width, LaneElement, LaneSplit, LaneWidth, MAX_LANES};
pub use normalize::{
    impute_nan, impute_nan_with, impute_nan_with_mean, impute_nan_with_mean_with, nan_mean,
    nan_mean_with, normalize_l2, normalize_l2_with, normalize_minmax, normalize_minmax_with,
    standardize_zscore, standardize_zscore_with, zscore_stats, zscore_stats_with, ValueRange,
    ZScoreStats,
};
pub use reduction::{
    dot_and_magnitudes_with, dot_product, dot_product_with, magnitude, magnitude_squared,
    magnitude_squared_with, magnitude_with, FusedReduction,
};
pub use similarity::{
    cosine_similarity, cosine_similarity_cached, cosine_similarity_cached_with,
    cosine_similarity_many, cosine_similarity_with, nearest_neighbors, CachedEmbedding, Neighbor,
};
