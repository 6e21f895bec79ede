//! Shared result types for the KNN benchmark harness.
//!
//! The benchmarking harness writes JSON files matching these types; this
//! crate only consumes them. Fields that the harness omits for some runs
//! (distance-calculation counters, speedups for the baseline) are optional.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Reference algorithm speedups are measured against.
pub const BASELINE_ALGORITHM: &str = "KNNBasic";

/// Fixed algorithm ordering used for plot legends, bar clusters, and table
/// columns. The baseline comes first.
pub const ALGORITHMS: [&str; 3] = ["KNNBasic", "KNNKDTree", "KNNNanoflann"];

/// Top-level benchmark report read from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkRun {
    /// Metadata about this run.
    pub benchmark_info: BenchmarkInfo,
    /// Individual measurements, in the order the harness produced them.
    pub results: Vec<BenchmarkRecord>,
}

/// Run-level metadata captured by the harness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkInfo {
    pub total_tests: u64,
    pub total_duration_sec: f64,
    /// ISO 8601 timestamp of the run start.
    pub timestamp: String,
}

/// A single measured run of one algorithm on one dataset configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    /// Dataset identifier. Encodes the sweep type by naming convention:
    /// `synthetic_<D>d` for dimensionality sweeps, `synthetic_n<N>` for size
    /// sweeps, `synthetic_k<K>` for K sweeps; anything else is a real
    /// dataset (optionally suffixed `_k<K>` per run).
    pub dataset_name: String,
    /// Algorithm display name (see [`ALGORITHMS`]).
    pub algorithm: String,
    pub n_dimensions: u32,
    pub n_samples: u64,
    pub k_neighbors: u32,
    pub avg_query_time_ms: f64,
    pub build_time_ms: f64,
    /// Distance-calculation counter, present only when the harness tracks it.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub avg_distance_calculations_per_query: Option<f64>,
    /// Speedup relative to the baseline; absent for the baseline itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub speedup_vs_basic: Option<f64>,
}

/// Classification quality metrics for one algorithm.
///
/// Class labels are strings that parse as integers; all orderings derived
/// from them are numeric ascending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationMetrics {
    /// Display name; callers fall back to the source file stem when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub algorithm: Option<String>,
    pub accuracy: f64,
    /// Per-class precision, keyed by class label.
    pub precision: BTreeMap<String, f64>,
    /// Per-class recall, keyed by class label.
    pub recall: BTreeMap<String, f64>,
    /// Per-class F1 score, keyed by class label.
    pub f1_score: BTreeMap<String, f64>,
    /// Counts keyed by true label then predicted label. An absent predicted
    /// key means zero.
    #[serde(default)]
    pub confusion_matrix: BTreeMap<String, BTreeMap<String, u64>>,
    /// Per-class ROC points, in harness order (not necessarily sorted).
    #[serde(default)]
    pub roc_curve: BTreeMap<String, Vec<RocPoint>>,
}

/// One point on a per-class ROC curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RocPoint {
    pub fpr: f64,
    pub tpr: f64,
}

/// Load a benchmark run document from disk.
pub fn load_run(path: impl AsRef<Path>) -> Result<BenchmarkRun> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&contents)?)
}

/// Load a classification metrics document from disk.
pub fn load_metrics(path: impl AsRef<Path>) -> Result<ClassificationMetrics> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&contents)?)
}
