//! Chart rendering against fixture sweeps.

mod common;

use common::{dimensionality_records, record, with_distance_calcs};
use knn_bench_report::{charts, select};

#[test]
fn dimensionality_chart_plots_the_sweep() {
    let records = dimensionality_records();
    let refs = select::dimensionality_sweep(&records);
    assert_eq!(refs.len(), 6);

    // Each algorithm's query-time series covers both swept dimensions.
    let dims = select::sorted_unique(&refs, |r| r.n_dimensions);
    assert_eq!(dims, vec![8, 32]);
    for algo in ["KNNBasic", "KNNKDTree", "KNNNanoflann"] {
        let series = select::series(&refs, algo, &dims, |r| r.n_dimensions, |r| {
            Some(r.avg_query_time_ms)
        });
        assert_eq!(series.len(), 2, "expected 2 points for {}", algo);
    }

    let dir = tempfile::tempdir().unwrap();
    charts::curse_of_dimensionality(&refs, dir.path()).unwrap();

    let path = dir.path().join("curse_of_dimensionality.png");
    let len = std::fs::metadata(&path).unwrap().len();
    assert!(len > 0, "chart file should not be empty");
}

#[test]
fn scalability_chart_renders_from_size_sweep() {
    let records = vec![
        record("synthetic_n1000", "KNNBasic", 16, 1000, 5, 0.5, 0.0),
        record("synthetic_n10000", "KNNBasic", 16, 10000, 5, 5.0, 0.0),
        record("synthetic_n1000", "KNNKDTree", 16, 1000, 5, 0.1, 2.0),
        record("synthetic_n10000", "KNNKDTree", 16, 10000, 5, 0.4, 30.0),
        record("synthetic_n1000", "KNNNanoflann", 16, 1000, 5, 0.08, 1.0),
        record("synthetic_n10000", "KNNNanoflann", 16, 10000, 5, 0.3, 15.0),
    ];
    let refs = select::size_sweep(&records);

    let dir = tempfile::tempdir().unwrap();
    charts::scalability(&refs, dir.path()).unwrap();
    assert!(dir.path().join("scalability.png").exists());
}

#[test]
fn k_chart_renders_from_k_sweep() {
    let records = vec![
        record("synthetic_k1", "KNNBasic", 16, 1000, 1, 0.5, 0.0),
        record("synthetic_k10", "KNNBasic", 16, 1000, 10, 0.7, 0.0),
        record("synthetic_k100", "KNNBasic", 16, 1000, 100, 1.5, 0.0),
        record("synthetic_k1", "KNNKDTree", 16, 1000, 1, 0.1, 2.0),
        record("synthetic_k10", "KNNKDTree", 16, 1000, 10, 0.2, 2.0),
        record("synthetic_k100", "KNNKDTree", 16, 1000, 100, 0.9, 2.0),
    ];
    let refs = select::k_sweep(&records);

    let dir = tempfile::tempdir().unwrap();
    charts::k_parameter_impact(&refs, dir.path()).unwrap();
    assert!(dir.path().join("k_parameter_impact.png").exists());
}

#[test]
fn distance_chart_renders_grouped_bars() {
    let records = vec![
        with_distance_calcs(record("iris_k3", "KNNBasic", 4, 150, 3, 0.1, 0.0), 150.0),
        with_distance_calcs(record("iris_k3", "KNNKDTree", 4, 150, 3, 0.05, 0.2), 42.0),
        with_distance_calcs(record("wine_k3", "KNNBasic", 13, 178, 3, 0.1, 0.0), 178.0),
    ];
    let refs = select::real_dataset_records(&records);

    let dir = tempfile::tempdir().unwrap();
    charts::distance_calculations_real_datasets(&refs, dir.path()).unwrap();
    assert!(dir
        .path()
        .join("distance_calculations_real_datasets.png")
        .exists());
}

#[test]
fn empty_real_dataset_selection_writes_no_file() {
    let dir = tempfile::tempdir().unwrap();
    charts::distance_calculations_real_datasets(&[], dir.path()).unwrap();

    assert!(!dir
        .path()
        .join("distance_calculations_real_datasets.png")
        .exists());
}

#[test]
fn thousands_separator_formatting() {
    assert_eq!(charts::format_thousands(0), "0");
    assert_eq!(charts::format_thousands(999), "999");
    assert_eq!(charts::format_thousands(1_000), "1,000");
    assert_eq!(charts::format_thousands(1_234_567), "1,234,567");
}
