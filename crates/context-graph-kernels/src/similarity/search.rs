//! Nearest-neighbour scoring of a query against a cached corpus.
//!
//! Corpus magnitudes are read from the cache, so each comparison costs a
//! single dot product. Large corpora are scored in parallel with rayon.

use std::cmp::Ordering;

use rayon::prelude::*;

use crate::config::DEFAULT_PARALLEL_THRESHOLD;
use crate::error::{KernelError, KernelResult};
use crate::lanes::{probe_lane_width, LaneWidth};

use super::cached::{cached_cosine_unchecked, CachedEmbedding};

/// One ranked corpus entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Position in the corpus slice.
    pub index: usize,
    /// Cosine similarity to the query.
    pub similarity: f32,
}

/// Cosine similarity of `query` against every corpus entry, in corpus order.
///
/// # Errors
/// - `KernelError::DimensionMismatch` for the first entry whose dimension
///   differs from the query; no partial scores are returned
pub fn cosine_similarity_many(
    query: &CachedEmbedding<'_>,
    corpus: &[CachedEmbedding<'_>],
) -> KernelResult<Vec<f32>> {
    score_corpus(
        query,
        corpus,
        probe_lane_width::<f32>(),
        DEFAULT_PARALLEL_THRESHOLD,
    )
}

/// The `k` corpus entries most similar to `query`.
///
/// Sorted by similarity descending, ties broken by ascending index, NaN
/// scores last. `k` larger than the corpus returns the whole corpus.
///
/// # Errors
/// - `KernelError::DimensionMismatch` if any entry's dimension differs
///
/// # Example
/// ```
/// use context_graph_kernels::{nearest_neighbors, CachedEmbedding};
///
/// let docs = [vec![0.0, 1.0], vec![1.0, 0.1], vec![-1.0, 0.0]];
/// let corpus: Vec<_> = docs.iter().map(|d| CachedEmbedding::new(d)).collect();
/// let query = CachedEmbedding::new(&[1.0, 0.0]);
/// let top = nearest_neighbors(&query, &corpus, 2).unwrap();
/// assert_eq!(top[0].index, 1);
/// assert_eq!(top[1].index, 0);
/// ```
pub fn nearest_neighbors(
    query: &CachedEmbedding<'_>,
    corpus: &[CachedEmbedding<'_>],
    k: usize,
) -> KernelResult<Vec<Neighbor>> {
    let scores = cosine_similarity_many(query, corpus)?;
    Ok(rank(scores, k))
}

pub(crate) fn score_corpus(
    query: &CachedEmbedding<'_>,
    corpus: &[CachedEmbedding<'_>],
    width: LaneWidth,
    parallel_threshold: usize,
) -> KernelResult<Vec<f32>> {
    if let Some(entry) = corpus.iter().find(|entry| entry.len() != query.len()) {
        return Err(KernelError::DimensionMismatch {
            expected: query.len(),
            actual: entry.len(),
        });
    }

    let parallel = corpus.len() >= parallel_threshold;
    tracing::debug!(
        corpus = corpus.len(),
        dimension = query.len(),
        lane_width = width.get(),
        parallel,
        "scoring corpus against query"
    );

    let score = |entry: &CachedEmbedding<'_>| cached_cosine_unchecked(query, entry, width);
    let scores: Vec<f32> = if parallel {
        corpus.par_iter().map(score).collect()
    } else {
        corpus.iter().map(score).collect()
    };
    Ok(scores)
}

pub(crate) fn rank(scores: Vec<f32>, k: usize) -> Vec<Neighbor> {
    let mut neighbors: Vec<Neighbor> = scores
        .into_iter()
        .enumerate()
        .map(|(index, similarity)| Neighbor { index, similarity })
        .collect();
    neighbors.sort_by(compare_neighbors);
    neighbors.truncate(k);
    neighbors
}

fn compare_neighbors(a: &Neighbor, b: &Neighbor) -> Ordering {
    let key = |n: &Neighbor| {
        if n.similarity.is_nan() {
            f32::NEG_INFINITY
        } else {
            // Folds -0.0 into +0.0 so signed zeros tie.
            n.similarity + 0.0
        }
    };
    key(b)
        .total_cmp(&key(a))
        .then_with(|| a.index.cmp(&b.index))
}
