//! Sweep selection and aggregation over benchmark records.
//!
//! Sweep membership is inferred from `dataset_name` by the harness naming
//! convention. All selections preserve the input order and never mutate the
//! records.

use std::collections::BTreeMap;

use log::warn;

use crate::schema::{BenchmarkRecord, ALGORITHMS};

/// Records from the dimensionality sweep (`synthetic_<D>d`).
pub fn dimensionality_sweep(records: &[BenchmarkRecord]) -> Vec<&BenchmarkRecord> {
    records
        .iter()
        .filter(|r| r.dataset_name.contains("synthetic_") && r.dataset_name.ends_with('d'))
        .collect()
}

/// Records from the dataset-size sweep (`synthetic_n<N>`).
pub fn size_sweep(records: &[BenchmarkRecord]) -> Vec<&BenchmarkRecord> {
    records
        .iter()
        .filter(|r| r.dataset_name.contains("synthetic_n"))
        .collect()
}

/// Records from the K-parameter sweep (`synthetic_k<K>`).
pub fn k_sweep(records: &[BenchmarkRecord]) -> Vec<&BenchmarkRecord> {
    records
        .iter()
        .filter(|r| r.dataset_name.contains("synthetic_k"))
        .collect()
}

/// Real-dataset records that carry a positive distance-calculation counter.
pub fn real_dataset_records(records: &[BenchmarkRecord]) -> Vec<&BenchmarkRecord> {
    records
        .iter()
        .filter(|r| {
            !r.dataset_name.contains("synthetic")
                && r.avg_distance_calculations_per_query
                    .is_some_and(|v| v > 0.0)
        })
        .collect()
}

/// Dataset key with any `_k<K>` run suffix removed, so per-K runs of the
/// same dataset land in one group.
pub fn dataset_group_key(name: &str) -> &str {
    match name.find("_k") {
        Some(i) => &name[..i],
        None => name,
    }
}

/// Per-dataset mean distance-calculation counts.
#[derive(Debug, Clone)]
pub struct DistanceCalcGroup {
    pub dataset: String,
    pub n_dimensions: u32,
    /// Mean counter per algorithm, indexed like [`ALGORITHMS`]. An algorithm
    /// with no contributing records reports 0.
    pub mean_per_algorithm: Vec<f64>,
}

/// Group real-dataset records by dataset key and average the
/// distance-calculation counter per algorithm. Groups come back sorted by
/// dataset name; the group's dimensionality is taken from its first record.
pub fn group_distance_calculations(records: &[&BenchmarkRecord]) -> Vec<DistanceCalcGroup> {
    let mut groups: BTreeMap<&str, (u32, Vec<Vec<f64>>)> = BTreeMap::new();

    for r in records {
        let key = dataset_group_key(&r.dataset_name);
        let entry = groups
            .entry(key)
            .or_insert_with(|| (r.n_dimensions, vec![Vec::new(); ALGORITHMS.len()]));
        if let Some(pos) = ALGORITHMS.iter().position(|a| *a == r.algorithm) {
            if let Some(v) = r.avg_distance_calculations_per_query {
                entry.1[pos].push(v);
            }
        }
    }

    groups
        .into_iter()
        .map(|(name, (n_dimensions, samples))| DistanceCalcGroup {
            dataset: name.to_string(),
            n_dimensions,
            mean_per_algorithm: samples.iter().map(|vs| mean(vs)).collect(),
        })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Distinct values of the swept variable, ascending.
pub fn sorted_unique<T, F>(records: &[&BenchmarkRecord], key: F) -> Vec<T>
where
    T: Ord + Copy,
    F: Fn(&BenchmarkRecord) -> T,
{
    let mut values: Vec<T> = records.iter().map(|r| key(r)).collect();
    values.sort_unstable();
    values.dedup();
    values
}

/// Aligned (x, y) series for one algorithm over the swept values.
///
/// For each swept value the first matching record supplies the y value. A
/// swept value with no measurement is omitted from the series (with a logged
/// warning) rather than shifting later points, so x and y can never get out
/// of step.
pub fn series<T, K, V>(
    records: &[&BenchmarkRecord],
    algorithm: &str,
    x_values: &[T],
    key: K,
    value: V,
) -> Vec<(T, f64)>
where
    T: Ord + Copy + std::fmt::Display,
    K: Fn(&BenchmarkRecord) -> T,
    V: Fn(&BenchmarkRecord) -> Option<f64>,
{
    let mut points = Vec::with_capacity(x_values.len());
    for &x in x_values {
        let hit = records
            .iter()
            .find(|r| r.algorithm == algorithm && key(r) == x)
            .and_then(|r| value(r));
        match hit {
            Some(y) => points.push((x, y)),
            None => warn!("missing {} measurement at swept value {}", algorithm, x),
        }
    }
    points
}
