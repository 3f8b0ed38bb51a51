use thiserror::Error;

/// Convenience result type for loading operations.
pub type LoadResult<T> = Result<T, DataUnavailable>;

/// Convenience result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Error returned when the project dataset cannot be loaded.
///
/// Every variant is a reason for the same condition: the table is not available. Callers that
/// only need a table to show should go through [`crate::ingestion::load_or_empty`], which turns
/// any of these into an empty table plus a warning.
#[derive(Debug, Error)]
pub enum DataUnavailable {
    /// The HTTP request could not be completed (DNS, connect, TLS, timeout, body read).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("unexpected http status {status} from {url}")]
    Status { status: u16, url: String },

    /// Underlying I/O error (e.g. local file not found).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The body is not parsable CSV.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The header row lacks one or more of the required columns.
    #[error("missing required columns {missing:?}. headers={headers:?}")]
    MissingColumns {
        missing: Vec<String>,
        headers: Vec<String>,
    },
}

/// Error returned by the exporters.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV writer error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error (flushing buffers, writing export files to disk).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Workbook writer error.
    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Error returned when reading a [`crate::config::DashboardConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}
