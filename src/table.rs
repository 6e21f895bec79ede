//! LaTeX summary table for the dimensionality sweep.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

use crate::error::Result;
use crate::schema::{BenchmarkRecord, ALGORITHMS, BASELINE_ALGORITHM};
use crate::select;

/// Write the dimensionality-sweep summary as a LaTeX table.
///
/// One row per distinct dimension: query time per algorithm plus the best
/// speedup over the baseline. A dimension missing any algorithm's
/// measurement is skipped with a warning; partial sweeps are an expected
/// condition, not an error.
pub fn write_latex_table(records: &[&BenchmarkRecord], output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join("benchmark_table.tex");

    let dims = select::sorted_unique(records, |r| r.n_dimensions);
    let columns = vec!["c"; ALGORITHMS.len() + 2].join("|");
    let header = ALGORITHMS
        .iter()
        .map(|a| format!("{} (ms)", a))
        .collect::<Vec<_>>()
        .join(" & ");

    let mut latex = Vec::new();
    latex.push("% KNN Benchmark Results - Curse of Dimensionality".to_string());
    latex.push("\\begin{table}[h]".to_string());
    latex.push("\\centering".to_string());
    latex.push(format!("\\begin{{tabular}}{{|{}|}}", columns));
    latex.push("\\hline".to_string());
    latex.push(format!("Dimensions & {} & Best Speedup \\\\", header));
    latex.push("\\hline".to_string());

    for &d in &dims {
        let time_for = |algo: &str| {
            records
                .iter()
                .find(|r| r.algorithm == algo && r.n_dimensions == d)
                .map(|r| r.avg_query_time_ms)
        };

        let Some(baseline_time) = time_for(BASELINE_ALGORITHM) else {
            warn!(
                "skipping dimension {}: no {} measurement",
                d, BASELINE_ALGORITHM
            );
            continue;
        };

        let mut cells = vec![format!("{:.3}", baseline_time)];
        let mut best_speedup = f64::NEG_INFINITY;
        let mut complete = true;
        for algo in ALGORITHMS.iter().filter(|a| **a != BASELINE_ALGORITHM) {
            match time_for(algo) {
                Some(t) => {
                    cells.push(format!("{:.3}", t));
                    best_speedup = best_speedup.max(baseline_time / t);
                }
                None => {
                    warn!("skipping dimension {}: no {} measurement", d, algo);
                    complete = false;
                    break;
                }
            }
        }
        if !complete {
            continue;
        }

        latex.push(format!(
            "{} & {} & {:.2}x \\\\",
            d,
            cells.join(" & "),
            best_speedup
        ));
    }

    latex.push("\\hline".to_string());
    latex.push("\\end{tabular}".to_string());
    latex.push("\\caption{Query time comparison across different dimensionalities}".to_string());
    latex.push("\\label{tab:curse_of_dimensionality}".to_string());
    latex.push("\\end{table}".to_string());

    fs::write(&path, latex.join("\n"))?;
    println!("Saved: {}", path.display());
    Ok(path)
}
