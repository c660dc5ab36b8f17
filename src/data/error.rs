use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Everything that can go wrong while turning a source file into a [`Table`].
///
/// A load failure at startup is fatal: there is no dashboard without a base
/// table.
///
/// [`Table`]: super::model::Table
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("data file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    /// Header row lacks one or more of the contract columns.
    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("row {row}, column '{column}': {message}")]
    Malformed {
        row: usize,
        column: &'static str,
        message: String,
    },

    #[error("no records in {}", .0.display())]
    Empty(PathBuf),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

impl DataLoadError {
    pub(crate) fn malformed(row: usize, column: &'static str, message: impl Into<String>) -> Self {
        DataLoadError::Malformed {
            row,
            column,
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("writing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Empty result
// ---------------------------------------------------------------------------

/// Advisory only: the current filter combination matched nothing.
///
/// Views stay valid (just empty); the UI shows a "no data" state instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyResultWarning {
    /// Size of the unfiltered table the filter ran against.
    pub table_len: usize,
}

impl fmt::Display for EmptyResultWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "No data: none of the {} topic clusters match the current filters",
            self.table_len
        )
    }
}
