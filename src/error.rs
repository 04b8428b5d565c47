use thiserror::Error;

use crate::data::normalize::MalformedCell;

/// Errors raised while loading the dataset or interpreting a selection.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// A year cell could not be normalised to a finite number.
    #[error("malformed data in row {row} ('{country}'), column '{column}': {source}")]
    MalformedData {
        /// 1-based data row (the header is not counted).
        row: usize,
        country: String,
        column: String,
        #[source]
        source: MalformedCell,
    },

    #[error("invalid year range: start {start} is after end {end}")]
    InvalidSelection { start: i32, end: i32 },

    #[error("year range must have exactly two values, got {0}")]
    InvalidRangeArity(usize),

    #[error("dataset has no 'country' column")]
    MissingCountryColumn,

    #[error("column '{0}' is not a year label")]
    InvalidYearColumn(String),

    #[error("year columns are not ascending: '{previous}' is followed by '{column}'")]
    UnorderedYearColumns { previous: String, column: String },

    #[error("dataset has no year columns")]
    NoYearColumns,

    #[error("country '{0}' appears more than once")]
    DuplicateCountry(String),

    #[error("row {row} has {found} cells but the header has {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {0} has a missing or non-text country")]
    InvalidCountry(usize),

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("column '{column}' has unsupported type {data_type}")]
    UnsupportedColumnType { column: String, data_type: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

impl DashboardError {
    /// Whether the error comes from a user selection rather than from the data.
    pub fn is_selection_error(&self) -> bool {
        matches!(
            self,
            DashboardError::InvalidSelection { .. } | DashboardError::InvalidRangeArity(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
