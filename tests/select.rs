//! Sweep selection and aggregation behavior.

mod common;

use common::{record, with_distance_calcs};
use knn_bench_report::select;

fn mixed_records() -> Vec<knn_bench_report::schema::BenchmarkRecord> {
    vec![
        record("synthetic_8d", "KNNBasic", 8, 1000, 5, 1.0, 0.0),
        record("synthetic_n1000", "KNNBasic", 16, 1000, 5, 0.8, 0.0),
        record("synthetic_k5", "KNNBasic", 16, 1000, 5, 0.9, 0.0),
        with_distance_calcs(record("iris_k3", "KNNBasic", 4, 150, 3, 0.1, 0.0), 150.0),
        record("synthetic_32d", "KNNKDTree", 32, 1000, 5, 1.2, 3.0),
    ]
}

#[test]
fn sweep_selections_follow_naming_convention() {
    let records = mixed_records();

    let cod: Vec<&str> = select::dimensionality_sweep(&records)
        .iter()
        .map(|r| r.dataset_name.as_str())
        .collect();
    assert_eq!(cod, vec!["synthetic_8d", "synthetic_32d"]);

    let sizes: Vec<&str> = select::size_sweep(&records)
        .iter()
        .map(|r| r.dataset_name.as_str())
        .collect();
    assert_eq!(sizes, vec!["synthetic_n1000"]);

    let ks: Vec<&str> = select::k_sweep(&records)
        .iter()
        .map(|r| r.dataset_name.as_str())
        .collect();
    assert_eq!(ks, vec!["synthetic_k5"]);

    let real: Vec<&str> = select::real_dataset_records(&records)
        .iter()
        .map(|r| r.dataset_name.as_str())
        .collect();
    assert_eq!(real, vec!["iris_k3"]);
}

#[test]
fn selection_is_idempotent_and_order_preserving() {
    let records = mixed_records();
    let first = select::dimensionality_sweep(&records);
    let second = select::dimensionality_sweep(&records);

    let names = |sel: &[&knn_bench_report::schema::BenchmarkRecord]| {
        sel.iter().map(|r| r.dataset_name.clone()).collect::<Vec<_>>()
    };
    assert_eq!(names(&first), names(&second));
}

#[test]
fn real_selection_requires_positive_counter() {
    let records = vec![
        record("wine_k3", "KNNBasic", 13, 178, 3, 0.1, 0.0),
        with_distance_calcs(record("wine_k5", "KNNBasic", 13, 178, 5, 0.1, 0.0), 0.0),
        with_distance_calcs(record("wine_k7", "KNNBasic", 13, 178, 7, 0.1, 0.0), 178.0),
    ];
    let real = select::real_dataset_records(&records);
    assert_eq!(real.len(), 1);
    assert_eq!(real[0].dataset_name, "wine_k7");
}

#[test]
fn group_key_strips_k_suffix() {
    assert_eq!(select::dataset_group_key("iris_k3"), "iris");
    assert_eq!(select::dataset_group_key("mnist_784_k5"), "mnist_784");
    assert_eq!(select::dataset_group_key("wine"), "wine");
}

#[test]
fn group_means_average_per_algorithm() {
    let records = vec![
        with_distance_calcs(record("iris_k3", "KNNBasic", 4, 150, 3, 0.1, 0.0), 100.0),
        with_distance_calcs(record("iris_k5", "KNNBasic", 4, 150, 5, 0.1, 0.0), 200.0),
        with_distance_calcs(record("iris_k3", "KNNKDTree", 4, 150, 3, 0.05, 0.2), 40.0),
    ];
    let refs: Vec<_> = records.iter().collect();
    let groups = select::group_distance_calculations(&refs);

    assert_eq!(groups.len(), 1);
    let g = &groups[0];
    assert_eq!(g.dataset, "iris");
    assert_eq!(g.n_dimensions, 4);
    assert!((g.mean_per_algorithm[0] - 150.0).abs() < 1e-9);
    assert!((g.mean_per_algorithm[1] - 40.0).abs() < 1e-9);
    // No nanoflann records: mean reports 0, not an error.
    assert_eq!(g.mean_per_algorithm[2], 0.0);
}

#[test]
fn group_means_invariant_under_reordering() {
    let mut records = vec![
        with_distance_calcs(record("iris_k3", "KNNBasic", 4, 150, 3, 0.1, 0.0), 100.0),
        with_distance_calcs(record("iris_k5", "KNNBasic", 4, 150, 5, 0.1, 0.0), 200.0),
        with_distance_calcs(record("wine_k3", "KNNBasic", 13, 178, 3, 0.1, 0.0), 900.0),
        with_distance_calcs(record("wine_k3", "KNNKDTree", 13, 178, 3, 0.05, 0.3), 300.0),
    ];
    let refs: Vec<_> = records.iter().collect();
    let forward = select::group_distance_calculations(&refs);

    records.reverse();
    let refs: Vec<_> = records.iter().collect();
    let reversed = select::group_distance_calculations(&refs);

    assert_eq!(forward.len(), reversed.len());
    for (a, b) in forward.iter().zip(reversed.iter()) {
        assert_eq!(a.dataset, b.dataset);
        for (x, y) in a.mean_per_algorithm.iter().zip(b.mean_per_algorithm.iter()) {
            assert!((x - y).abs() < 1e-9);
        }
    }
}

#[test]
fn series_omits_missing_points_without_misalignment() {
    // KNNKDTree has no measurement at 16 dimensions.
    let records = vec![
        record("synthetic_8d", "KNNBasic", 8, 1000, 5, 1.0, 0.0),
        record("synthetic_16d", "KNNBasic", 16, 1000, 5, 2.0, 0.0),
        record("synthetic_32d", "KNNBasic", 32, 1000, 5, 4.0, 0.0),
        record("synthetic_8d", "KNNKDTree", 8, 1000, 5, 0.5, 1.0),
        record("synthetic_32d", "KNNKDTree", 32, 1000, 5, 0.9, 2.0),
    ];
    let refs: Vec<_> = records.iter().collect();
    let dims = select::sorted_unique(&refs, |r| r.n_dimensions);
    assert_eq!(dims, vec![8, 16, 32]);

    let basic = select::series(&refs, "KNNBasic", &dims, |r| r.n_dimensions, |r| {
        Some(r.avg_query_time_ms)
    });
    assert_eq!(basic, vec![(8, 1.0), (16, 2.0), (32, 4.0)]);

    let kdtree = select::series(&refs, "KNNKDTree", &dims, |r| r.n_dimensions, |r| {
        Some(r.avg_query_time_ms)
    });
    // The gap at 16 is omitted; remaining points stay paired with their x.
    assert_eq!(kdtree, vec![(8, 0.5), (32, 0.9)]);
}
