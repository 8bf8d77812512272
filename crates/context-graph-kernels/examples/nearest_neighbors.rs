// Rank a small synthetic corpus against a query with cached magnitudes.
//
// Run: RUST_LOG=debug cargo run -p context-graph-kernels --example nearest_neighbors
use context_graph_kernels::{probe_lane_width, CachedEmbedding, KernelConfig, Kernels};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    println!("=== NEAREST NEIGHBORS ===\n");
    println!("Probed lane width (f32): {}", probe_lane_width::<f32>());
    println!("Probed lane width (f64): {}", probe_lane_width::<f64>());

    let config = KernelConfig::default().with_env_overrides();
    let kernels = Kernels::from_config(&config)?;
    println!("Effective lane width: {}\n", kernels.lane_width());

    let mut docs: Vec<Vec<f32>> = (0..16)
        .map(|d| (0..384).map(|i| ((d * 384 + i) as f32 * 0.0021).sin()).collect())
        .collect();
    // One corrupted embedding, sanitized before it is cached.
    docs[3][10] = f32::NAN;
    for doc in docs.iter_mut() {
        let replaced = kernels.impute_nan_with_mean(doc);
        if replaced > 0 {
            println!("Imputed {} NaN value(s)", replaced);
        }
        kernels.normalize_l2(doc);
    }

    let corpus: Vec<CachedEmbedding<'_>> = docs.iter().map(|d| kernels.cache(d)).collect();
    let query = kernels.cache(&docs[5]);

    for neighbor in kernels.nearest_neighbors(&query, &corpus, 5)? {
        println!(
            "  doc {:2}  similarity {:+.6}",
            neighbor.index, neighbor.similarity
        );
    }
    Ok(())
}
