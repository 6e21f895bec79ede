//! Chart and report generation for KNN benchmark results.
//!
//! The KNN benchmarking harness writes two kinds of JSON documents: benchmark
//! runs (timing sweeps over dimensionality, dataset size, and K) and
//! per-algorithm classification metrics. This crate reads those documents and
//! renders comparison charts, a LaTeX summary table, and a classification
//! metrics report. It never runs the algorithms themselves.

pub mod charts;
pub mod error;
pub mod report;
pub mod schema;
pub mod select;
pub mod table;
