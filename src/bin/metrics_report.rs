//! Classification metrics report.
//!
//! Loads one or more per-algorithm metrics JSON files, prints a console
//! summary, and renders the metrics figure (detail view for one file,
//! comparison view for several).
//!
//! Usage: `cargo run --bin metrics-report -- metrics_basic.json [metrics_kdtree.json ...]`

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use knn_bench_report::report::{self, NamedMetrics};
use knn_bench_report::schema;

/// Visualize KNN classification metrics from one or more JSON files.
#[derive(Parser, Debug)]
#[command(name = "metrics-report")]
#[command(about = "Visualize KNN classification metrics from one or more JSON files")]
struct Args {
    /// Metrics JSON files, one per algorithm.
    #[arg(required = true)]
    metrics: Vec<PathBuf>,

    /// Output image path.
    #[arg(long, default_value = "metrics_visualization.png")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut instances = Vec::with_capacity(args.metrics.len());
    for path in &args.metrics {
        let metrics = schema::load_metrics(path)
            .with_context(|| format!("failed to load {}", path.display()))?;
        let name = metrics.algorithm.clone().unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string())
        });
        instances.push(NamedMetrics { name, metrics });
    }

    report::print_summary(&instances);
    report::render_report(&instances, &args.output)?;
    println!("\nVisualization saved to: {}", args.output.display());

    Ok(())
}
