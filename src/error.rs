//! Error types for report generation.

use thiserror::Error;

/// Errors raised while loading input documents.
///
/// Both variants are fatal: a missing or malformed input file aborts the run
/// before any artifact is written. Data-sparsity conditions (empty sweep
/// subsets, missing measurements) are not errors and are handled locally by
/// the renderers with a logged warning.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Input file missing or unreadable.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Input file is not valid JSON or is missing required keys.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, ReportError>;
