//! Shared fixtures for report tests.

#![allow(dead_code)]

use std::collections::BTreeMap;

use knn_bench_report::schema::{
    BenchmarkInfo, BenchmarkRecord, BenchmarkRun, ClassificationMetrics, RocPoint,
};

pub fn record(
    dataset: &str,
    algorithm: &str,
    dims: u32,
    samples: u64,
    k: u32,
    query_ms: f64,
    build_ms: f64,
) -> BenchmarkRecord {
    BenchmarkRecord {
        dataset_name: dataset.to_string(),
        algorithm: algorithm.to_string(),
        n_dimensions: dims,
        n_samples: samples,
        k_neighbors: k,
        avg_query_time_ms: query_ms,
        build_time_ms: build_ms,
        avg_distance_calculations_per_query: None,
        speedup_vs_basic: None,
    }
}

pub fn with_distance_calcs(mut r: BenchmarkRecord, v: f64) -> BenchmarkRecord {
    r.avg_distance_calculations_per_query = Some(v);
    r
}

pub fn with_speedup(mut r: BenchmarkRecord, v: f64) -> BenchmarkRecord {
    r.speedup_vs_basic = Some(v);
    r
}

/// Complete dimensionality sweep over 8 and 32 dimensions for all three
/// algorithms, with known query times.
pub fn dimensionality_records() -> Vec<BenchmarkRecord> {
    vec![
        record("synthetic_8d", "KNNBasic", 8, 1000, 5, 1.0, 0.0),
        with_speedup(record("synthetic_8d", "KNNKDTree", 8, 1000, 5, 0.5, 2.0), 2.0),
        with_speedup(record("synthetic_8d", "KNNNanoflann", 8, 1000, 5, 0.3, 1.0), 3.33),
        record("synthetic_32d", "KNNBasic", 32, 1000, 5, 5.0, 0.0),
        with_speedup(record("synthetic_32d", "KNNKDTree", 32, 1000, 5, 1.0, 4.0), 5.0),
        with_speedup(record("synthetic_32d", "KNNNanoflann", 32, 1000, 5, 0.6, 2.0), 8.33),
    ]
}

pub fn sample_run(results: Vec<BenchmarkRecord>) -> BenchmarkRun {
    BenchmarkRun {
        benchmark_info: BenchmarkInfo {
            total_tests: results.len() as u64,
            total_duration_sec: 12.5,
            timestamp: "2026-08-23T10:00:00Z".to_string(),
        },
        results,
    }
}

/// Two-class metrics instance with the confusion matrix from the rendering
/// contract: predicted counts absent from the mapping must read as zero.
pub fn sample_metrics(algorithm: &str) -> ClassificationMetrics {
    let per_class = |a: f64, b: f64| {
        let mut m = BTreeMap::new();
        m.insert("0".to_string(), a);
        m.insert("1".to_string(), b);
        m
    };

    let mut confusion = BTreeMap::new();
    let mut row0 = BTreeMap::new();
    row0.insert("0".to_string(), 10u64);
    row0.insert("1".to_string(), 2u64);
    confusion.insert("0".to_string(), row0);
    let mut row1 = BTreeMap::new();
    row1.insert("1".to_string(), 8u64);
    confusion.insert("1".to_string(), row1);

    let mut roc = BTreeMap::new();
    roc.insert(
        "0".to_string(),
        vec![
            RocPoint { fpr: 0.5, tpr: 0.9 },
            RocPoint { fpr: 0.1, tpr: 0.6 },
            RocPoint { fpr: 0.3, tpr: 0.8 },
        ],
    );

    ClassificationMetrics {
        algorithm: Some(algorithm.to_string()),
        accuracy: 0.9,
        precision: per_class(0.91, 0.89),
        recall: per_class(0.83, 0.94),
        f1_score: per_class(0.87, 0.91),
        confusion_matrix: confusion,
        roc_curve: roc,
    }
}
