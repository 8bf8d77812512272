//! Cosine similarity engine.
//!
//! Raw-buffer cosine computes the dot product and both magnitudes in one
//! fused pass. [`CachedEmbedding`] carries a magnitude computed once, so
//! repeated comparisons (nearest-neighbour search over a fixed corpus) pay
//! only for the dot product.
//!
//! Zero-magnitude policy: similarity against a zero vector is exactly 0.0,
//! never NaN and never an error.

mod cached;
mod cosine;
mod search;
#[cfg(test)]
mod tests;

pub use cached::{cosine_similarity_cached, cosine_similarity_cached_with, CachedEmbedding};
pub use cosine::{cosine_similarity, cosine_similarity_with};
pub use search::{cosine_similarity_many, nearest_neighbors, Neighbor};

pub(crate) use search::{rank, score_corpus};
