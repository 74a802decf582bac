use thiserror::Error;

// ---------------------------------------------------------------------------
// Pipeline error taxonomy
// ---------------------------------------------------------------------------

/// Errors produced by the data pipeline.
///
/// The first group covers dataset loading; the middle two are caller bugs
/// (a column was requested that the UI should never have offered) and are
/// propagated rather than recovered; `EmptyColumn` is recoverable and the
/// UI shows a placeholder instead of the statistic.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("dataset is empty")]
    EmptyFile,

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("column '{0}' not found")]
    ColumnNotFound(String),

    #[error("column '{column}' is not {expected}")]
    InvalidAggregation {
        column: String,
        expected: &'static str,
    },

    #[error("column '{0}' has no usable values")]
    EmptyColumn(String),
}

/// Result alias used throughout the data layer.
pub type DataResult<T> = Result<T, DataError>;
