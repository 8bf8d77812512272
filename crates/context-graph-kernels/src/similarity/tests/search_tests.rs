//! Tests for corpus scoring and nearest-neighbour ranking.

use super::super::*;
use crate::error::KernelError;
use crate::lanes::LaneWidth;

fn corpus_vectors() -> Vec<Vec<f32>> {
    vec![
        vec![0.0, 1.0, 0.0],
        vec![1.0, 0.1, 0.0],
        vec![-1.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0],
        vec![0.9, 0.0, 0.1],
    ]
}

#[test]
fn test_similarity_many_in_corpus_order() {
    let docs = corpus_vectors();
    let corpus: Vec<_> = docs.iter().map(|d| CachedEmbedding::new(d)).collect();
    let query_values = [1.0f32, 0.0, 0.0];
    let query = CachedEmbedding::new(&query_values);

    let scores = cosine_similarity_many(&query, &corpus).unwrap();
    assert_eq!(scores.len(), corpus.len());
    for (score, entry) in scores.iter().zip(&corpus) {
        let expected = cosine_similarity_cached(&query, entry).unwrap();
        assert_eq!(*score, expected);
    }
    assert_eq!(scores[3], 0.0, "zero vector scores 0.0");
}

#[test]
fn test_nearest_neighbors_ordering() {
    let docs = corpus_vectors();
    let corpus: Vec<_> = docs.iter().map(|d| CachedEmbedding::new(d)).collect();
    let query_values = [1.0f32, 0.0, 0.0];
    let query = CachedEmbedding::new(&query_values);

    let top = nearest_neighbors(&query, &corpus, 3).unwrap();
    let indices: Vec<usize> = top.iter().map(|n| n.index).collect();
    assert_eq!(indices, vec![4, 1, 0]);
    assert!(top.windows(2).all(|w| w[0].similarity >= w[1].similarity));
    println!("[PASS] Nearest neighbors = {:?}", top);
}

#[test]
fn test_nearest_neighbors_k_exceeds_corpus() {
    let docs = corpus_vectors();
    let corpus: Vec<_> = docs.iter().map(|d| CachedEmbedding::new(d)).collect();
    let query_values = [0.0f32, 1.0, 0.0];
    let top = nearest_neighbors(&CachedEmbedding::new(&query_values), &corpus, 100).unwrap();
    assert_eq!(top.len(), corpus.len());
    assert_eq!(top[0].index, 0);
    // Entries 2, 3 and 4 all score 0.0 and keep corpus order.
    assert_eq!(top.last().map(|n| n.index), Some(4));
}

#[test]
fn test_nearest_neighbors_empty_corpus_and_zero_k() {
    let query_values = [1.0f32, 0.0];
    let query = CachedEmbedding::new(&query_values);
    assert!(nearest_neighbors(&query, &[], 5).unwrap().is_empty());

    let docs = [vec![1.0f32, 0.0]];
    let corpus: Vec<_> = docs.iter().map(|d| CachedEmbedding::new(d)).collect();
    assert!(nearest_neighbors(&query, &corpus, 0).unwrap().is_empty());
}

#[test]
fn test_corpus_dimension_mismatch_returns_no_scores() {
    let docs = [vec![1.0f32, 0.0], vec![1.0f32, 0.0, 0.0]];
    let corpus: Vec<_> = docs.iter().map(|d| CachedEmbedding::new(d)).collect();
    let query_values = [1.0f32, 0.0];
    let result = cosine_similarity_many(&CachedEmbedding::new(&query_values), &corpus);
    assert_eq!(
        result,
        Err(KernelError::DimensionMismatch {
            expected: 2,
            actual: 3
        })
    );
}

#[test]
fn test_parallel_and_sequential_scoring_agree() {
    let docs: Vec<Vec<f32>> = (0..300)
        .map(|d| (0..64).map(|i| ((d * 64 + i) as f32 * 0.013).sin()).collect())
        .collect();
    let corpus: Vec<_> = docs.iter().map(|d| CachedEmbedding::new(d)).collect();
    let query_values: Vec<f32> = (0..64).map(|i| (i as f32 * 0.1).cos()).collect();
    let query = CachedEmbedding::new(&query_values);
    let width = LaneWidth::new(8).unwrap();

    let sequential = score_corpus(&query, &corpus, width, usize::MAX).unwrap();
    let parallel = score_corpus(&query, &corpus, width, 0).unwrap();
    assert_eq!(sequential, parallel);
    println!("[PASS] rayon scoring matches sequential scoring over {} entries", corpus.len());
}

#[test]
fn test_rank_ties_and_nan() {
    let ranked = rank(vec![0.5, f32::NAN, 0.9, 0.5], 4);
    let indices: Vec<usize> = ranked.iter().map(|n| n.index).collect();
    assert_eq!(indices, vec![2, 0, 3, 1]);
}
