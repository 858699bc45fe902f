use thiserror::Error;

/// volhours error types
#[derive(Error, Debug)]
pub enum ReportError {
    /// Failed to parse JSON input
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A custom date-range bound could not be parsed as YYYY-MM-DD
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Report format name not recognised
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Entry failed validation
    #[error("validation error: {0}")]
    Validation(String),

    /// Report rendering failed
    #[error("render error: {0}")]
    Render(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Parse(err.to_string())
    }
}

impl From<csv::Error> for ReportError {
    fn from(err: csv::Error) -> Self {
        ReportError::Render(err.to_string())
    }
}

/// Result type alias for volhours
pub type Result<T> = std::result::Result<T, ReportError>;
