//! Tests for `CachedEmbedding` and cached cosine similarity.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::super::*;
use crate::error::KernelError;
use crate::lanes::LaneWidth;
use crate::reduction::magnitude;

#[test]
fn test_cached_magnitude_computed_at_construction() {
    let v = [3.0f32, 4.0];
    let cached = CachedEmbedding::new(&v);
    assert_eq!(cached.magnitude(), 5.0);
    assert_eq!(cached.values(), &v[..]);
    assert_eq!(cached.len(), 2);
    assert!(!cached.is_empty());
    assert!(!cached.is_zero());
    println!("[PASS] CachedEmbedding magnitude = {}", cached.magnitude());
}

#[test]
fn test_cached_zero_vector() {
    let v = [0.0f32; 8];
    let other = [1.0f32; 8];
    let zero = CachedEmbedding::new(&v);
    assert!(zero.is_zero());
    let sim = cosine_similarity_cached(&zero, &CachedEmbedding::new(&other)).unwrap();
    assert_eq!(sim, 0.0);
}

#[test]
fn test_cached_dimension_mismatch() {
    let a = [1.0f32, 2.0, 3.0];
    let b = [1.0f32, 2.0];
    let result = cosine_similarity_cached(&CachedEmbedding::new(&a), &CachedEmbedding::new(&b));
    assert_eq!(
        result,
        Err(KernelError::DimensionMismatch {
            expected: 3,
            actual: 2
        })
    );
}

#[test]
fn test_cached_matches_uncached() {
    let mut rng = StdRng::seed_from_u64(2024);
    for dim in [3, 8, 17, 384, 768, 1024] {
        let a: Vec<f32> = (0..dim).map(|_| rng.gen_range(-1.0f32..1.0)).collect();
        let b: Vec<f32> = (0..dim).map(|_| rng.gen_range(-1.0f32..1.0)).collect();
        let uncached = cosine_similarity(&a, &b).unwrap();
        let cached =
            cosine_similarity_cached(&CachedEmbedding::new(&a), &CachedEmbedding::new(&b))
                .unwrap();
        assert!(
            (uncached - cached).abs() < 1e-6,
            "dim {}: uncached {} vs cached {}",
            dim,
            uncached,
            cached
        );
    }
    println!("[PASS] Cached and uncached cosine agree");
}

#[test]
fn test_cached_with_explicit_width() {
    let a: Vec<f32> = (0..50).map(|i| (i as f32).sqrt()).collect();
    let b: Vec<f32> = (0..50).map(|i| (i as f32 * 0.2).cos()).collect();
    for w in [1, 4, 8, 16] {
        let width = LaneWidth::new(w).unwrap();
        let ca = CachedEmbedding::with_lane_width(&a, width);
        let cb = CachedEmbedding::with_lane_width(&b, width);
        let cached = cosine_similarity_cached_with(&ca, &cb, width).unwrap();
        let raw = cosine_similarity_with(&a, &b, width).unwrap();
        // Same width: same magnitudes, same dot, same bits.
        assert_eq!(cached.to_bits(), raw.to_bits(), "width {}", w);
    }
}

#[test]
fn test_cached_magnitude_matches_reduction() {
    let v: Vec<f32> = (0..129).map(|i| i as f32 * 0.01).collect();
    assert_eq!(CachedEmbedding::new(&v).magnitude(), magnitude(&v));
}

#[test]
fn test_cached_embedding_shared_across_threads() {
    let v: Vec<f32> = (0..256).map(|i| (i as f32).sin()).collect();
    let cached = CachedEmbedding::new(&v);
    let sims: Vec<f32> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| cosine_similarity_cached(&cached, &cached).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for sim in sims {
        assert!((sim - 1.0).abs() < 1e-6);
    }
}

#[test]
fn test_cached_outside_normal_range_matches_uncached() {
    let huge = [2e19f32, 2e19, -1e19];
    let huge_other = [1e19f32, 3e19, 0.5];
    let tiny = [3e-25f32, 4e-25, 0.0];
    let normal = [1.0f32, 2.0, 3.0];
    let pairs: [(&[f32], &[f32]); 4] = [
        (&huge, &huge),
        (&huge, &huge_other),
        (&tiny, &normal),
        (&huge, &tiny),
    ];
    for (a, b) in pairs {
        let cached_a = CachedEmbedding::new(a);
        let cached_b = CachedEmbedding::new(b);
        assert!(cached_a.magnitude().is_finite() && cached_a.magnitude() > 0.0);
        let cached = cosine_similarity_cached(&cached_a, &cached_b).unwrap();
        let uncached = cosine_similarity(a, b).unwrap();
        assert!((-1.0..=1.0).contains(&cached), "{:?} vs {:?}: {}", a, b, cached);
        assert!(
            (cached - uncached).abs() < 1e-6,
            "{:?} vs {:?}: cached {} uncached {}",
            a,
            b,
            cached,
            uncached
        );
    }
    let cached_huge = CachedEmbedding::new(&huge);
    let self_sim = cosine_similarity_cached(&cached_huge, &cached_huge).unwrap();
    assert!((self_sim - 1.0).abs() < 1e-6, "cos(huge, huge) = {}", self_sim);
    println!("[PASS] Cached cosine stays in range for magnitudes beyond f32 squares");
}
