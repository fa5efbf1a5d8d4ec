//! Error types for DataCite record rendering and reading.

use thiserror::Error;

/// Errors that can occur when rendering, reading or loading DataCite records.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// XML parsing or writing error.
    #[error("XML error: {0}")]
    Xml(String),

    /// JSON record could not be decoded.
    #[error("JSON error: {0}")]
    Json(String),

    /// Document root is not a DataCite `resource` element.
    #[error("unexpected root element: expected 'resource', got '{found}'")]
    UnexpectedRoot { found: String },

    /// Required record fields are missing or blank.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

/// Result type for DataCite operations.
pub type Result<T> = std::result::Result<T, Error>;
