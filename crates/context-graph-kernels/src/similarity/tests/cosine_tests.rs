//! Tests for raw-buffer cosine similarity: geometry, the zero and empty
//! policies, lane-width agreement and magnitudes outside the normal range.

use super::super::*;
use crate::error::KernelError;
use crate::lanes::{LaneWidth, MAX_LANES};

fn every_width() -> impl Iterator<Item = LaneWidth> {
    (1..=MAX_LANES).filter_map(LaneWidth::new)
}

fn assert_in_range(sim: f32, context: &str) {
    assert!(
        (-1.0..=1.0).contains(&sim),
        "{}: cosine {} outside [-1, 1]",
        context,
        sim
    );
}

// =============================================================================
// Geometry
// =============================================================================

#[test]
fn test_cosine_parallel_and_scaled() {
    let v = [1.0f32, 2.0, 3.0, 4.0, 5.0];
    let scaled: Vec<f32> = v.iter().map(|x| x * 7.5).collect();
    let sim = cosine_similarity(&v, &scaled).unwrap();
    assert!((sim - 1.0).abs() < 1e-6, "v vs 7.5v = {}", sim);
    println!("[PASS] cos(v, 7.5v) = {:.6}", sim);
}

#[test]
fn test_cosine_unit_axes_are_orthogonal() {
    for dim in [2usize, 9, 17] {
        let mut a = vec![0.0f32; dim];
        let mut b = vec![0.0f32; dim];
        a[0] = 1.0;
        b[dim - 1] = 1.0;
        assert_eq!(cosine_similarity(&a, &b).unwrap(), 0.0, "dim {}", dim);
    }
}

#[test]
fn test_cosine_negated_is_minus_one() {
    let a = [0.5f32, -1.5, 2.5];
    let b: Vec<f32> = a.iter().map(|x| -x).collect();
    let sim = cosine_similarity(&a, &b).unwrap();
    assert!((sim + 1.0).abs() < 1e-6, "cos(a, -a) = {}", sim);
}

#[test]
fn test_cosine_alternating_signs() {
    // dot = 1, |a| = |b| = sqrt(5)
    let a = [1.0f32, -1.0, 1.0, -1.0, 1.0];
    let b = [1.0f32; 5];
    let sim = cosine_similarity(&a, &b).unwrap();
    assert!((sim - 0.2).abs() < 1e-6, "got {}", sim);
}

#[test]
fn test_cosine_length_mismatch() {
    let result = cosine_similarity(&[1.0, 2.0], &[1.0, 2.0, 3.0]);
    assert_eq!(
        result,
        Err(KernelError::DimensionMismatch {
            expected: 2,
            actual: 3
        })
    );
    println!("[PASS] cos over lengths 2 and 3: {:?}", result.err());
}

// =============================================================================
// Zero and Empty Input
// =============================================================================

#[test]
fn test_zero_vector_scores_exactly_zero() {
    let zero = vec![0.0f32; 37];
    let other: Vec<f32> = (0..37).map(|i| i as f32 - 18.0).collect();
    for width in every_width() {
        assert_eq!(cosine_similarity_with(&zero, &other, width).unwrap(), 0.0);
        assert_eq!(cosine_similarity_with(&other, &zero, width).unwrap(), 0.0);
        assert_eq!(cosine_similarity_with(&zero, &zero, width).unwrap(), 0.0);
    }
    println!("[PASS] Zero vector scores 0.0 at every lane width");
}

#[test]
fn test_empty_input_scores_zero() {
    let empty: [f32; 0] = [];
    assert_eq!(cosine_similarity(&empty, &empty).unwrap(), 0.0);
}

// =============================================================================
// Lane Width Agreement
// =============================================================================

#[test]
fn test_cosine_agrees_across_widths_with_tail() {
    // 383 leaves a tail at every lane width above 1.
    let a: Vec<f32> = (0..383).map(|i| ((i * 13) % 29) as f32 - 14.0).collect();
    let b: Vec<f32> = (0..383).map(|i| (i as f32 * 0.05).cos()).collect();
    let scalar = cosine_similarity_with(&a, &b, LaneWidth::SCALAR).unwrap();
    assert_in_range(scalar, "383-dim scalar");
    for width in every_width() {
        let batched = cosine_similarity_with(&a, &b, width).unwrap();
        assert!(
            (batched - scalar).abs() < 1e-5,
            "width {}: {} vs scalar {}",
            width,
            batched,
            scalar
        );
    }
}

#[test]
fn test_cosine_embedding_dimensions_in_range() {
    for dim in [384usize, 768, 1024, 1536] {
        let a: Vec<f32> = (0..dim).map(|i| (i as f32 * 0.37).sin()).collect();
        let b: Vec<f32> = (0..dim).map(|i| (i as f32 * 0.11).cos() - 0.2).collect();
        assert_in_range(cosine_similarity(&a, &b).unwrap(), &format!("{}-dim", dim));
    }
}

// =============================================================================
// Magnitudes Outside the Normal Range
// =============================================================================

#[test]
fn test_cosine_huge_finite_vectors() {
    // Each sum of squares exceeds f32::MAX.
    let a = [2e19f32, 2e19];
    let neg = [-2e19f32, -2e19];
    let rotated = [3e20f32, 4e20];
    let swapped = [4e20f32, 3e20];
    for width in every_width() {
        let same = cosine_similarity_with(&a, &a, width).unwrap();
        assert!((same - 1.0).abs() < 1e-6, "width {}: cos(a, a) = {}", width, same);
        let opposite = cosine_similarity_with(&a, &neg, width).unwrap();
        assert!((opposite + 1.0).abs() < 1e-6, "width {}: {}", width, opposite);
        let sim = cosine_similarity_with(&rotated, &swapped, width).unwrap();
        assert!((sim - 0.96).abs() < 1e-6, "width {}: {}", width, sim);
    }
    println!("[PASS] cos([2e19, 2e19], itself) = {}", cosine_similarity(&a, &a).unwrap());
}

#[test]
fn test_cosine_tiny_vectors_are_not_zero() {
    // Each sum of squares underflows to 0.0.
    let a = [3e-25f32, 4e-25];
    let b = [4e-25f32, 3e-25];
    for width in every_width() {
        let sim = cosine_similarity_with(&a, &b, width).unwrap();
        assert!((sim - 0.96).abs() < 1e-6, "width {}: {}", width, sim);
    }
}

#[test]
fn test_cosine_mixed_scales() {
    let huge = [1e30f32, 0.0, 1e30];
    let small = [1e-3f32, 0.0, 1e-3];
    let sim = cosine_similarity(&huge, &small).unwrap();
    assert!((sim - 1.0).abs() < 1e-6, "got {}", sim);
}

#[test]
fn test_nan_input_propagates() {
    let sim = cosine_similarity(&[1.0, f32::NAN], &[1.0, 1.0]).unwrap();
    assert!(sim.is_nan());
}
