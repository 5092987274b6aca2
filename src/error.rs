//! Crate-level error types.
//!
//! The reporting computations themselves are total and never fail;
//! [`ComissaoError`] covers the surfaces around them (configuration,
//! loading a report, talking to the calculation service, writing
//! workbooks) behind a single enum so callers can still use `?`.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ComissaoError>;

/// Top-level error type returned by all fallible public APIs.
#[derive(Debug, thiserror::Error)]
pub enum ComissaoError {
    /// Configuration from the environment was inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    /// A file or terminal operation failed.
    #[error("i/o error: {0}")]
    Io(String),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The HTTP request to the calculation service failed.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The calculation service rejected the request.
    #[error("service error ({status}): {detail}")]
    Service { status: u16, detail: String },

    /// A period date was malformed or the period was inverted.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Building the XLSX workbook failed.
    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
