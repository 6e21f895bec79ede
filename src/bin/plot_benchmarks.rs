//! Benchmark chart generation.
//!
//! Reads a benchmark results JSON file and renders the comparison charts and
//! the LaTeX summary table.
//!
//! Usage: `cargo run --bin plot-benchmarks -- --input results/benchmark_results.json`

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::warn;

use knn_bench_report::{charts, schema, select, table};

/// Generate charts and a LaTeX table from KNN benchmark results.
#[derive(Parser, Debug)]
#[command(name = "plot-benchmarks")]
#[command(about = "Generate charts and a LaTeX table from KNN benchmark results")]
struct Args {
    /// Benchmark results JSON file.
    #[arg(long, default_value = "results/benchmark_results.json")]
    input: PathBuf,

    /// Directory for generated artifacts; plots go in a plots/ subdirectory.
    #[arg(long, default_value = "results")]
    output_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Loading benchmark results...");
    let run = schema::load_run(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;

    println!("\nTotal tests: {}", run.benchmark_info.total_tests);
    println!(
        "Total duration: {:.2} seconds",
        run.benchmark_info.total_duration_sec
    );
    println!("Timestamp: {}", run.benchmark_info.timestamp);

    let results = &run.results;
    let plots_dir = args.output_dir.join("plots");

    println!("\nGenerating visualizations...");
    let cod = select::dimensionality_sweep(results);
    if let Err(e) = charts::curse_of_dimensionality(&cod, &plots_dir) {
        warn!("curse-of-dimensionality chart failed: {:#}", e);
    }
    if let Err(e) = charts::scalability(&select::size_sweep(results), &plots_dir) {
        warn!("scalability chart failed: {:#}", e);
    }
    if let Err(e) = charts::k_parameter_impact(&select::k_sweep(results), &plots_dir) {
        warn!("k-parameter chart failed: {:#}", e);
    }
    if let Err(e) =
        charts::distance_calculations_real_datasets(&select::real_dataset_records(results), &plots_dir)
    {
        warn!("distance-calculation chart failed: {:#}", e);
    }

    println!("\nGenerating LaTeX table...");
    if let Err(e) = table::write_latex_table(&cod, &args.output_dir) {
        warn!("LaTeX table generation failed: {}", e);
    }

    println!("\nAll visualizations complete!");
    println!("Check {} for PNG files", plots_dir.display());
    println!("  - curse_of_dimensionality.png");
    println!("  - scalability.png");
    println!("  - k_parameter_impact.png");
    println!("  - distance_calculations_real_datasets.png");
    println!(
        "Check {} for the LaTeX table",
        args.output_dir.display()
    );

    Ok(())
}
