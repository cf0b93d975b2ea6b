// Domain errors - Error types for the domain layer

use std::path::Path;
use thiserror::Error;

/// Domain-specific error types
#[derive(Error, Debug)]
pub enum DomainError {
    /// Manifest document is malformed or misses required fields
    #[error("Manifest parse error: {0}")]
    Parse(String),

    /// Invalid arguments provided
    #[error("Bad arguments: {0}")]
    BadArgs(String),

    /// Timecode not of the form HH:MM:SS
    #[error("Invalid timecode '{0}'. Expected HH:MM:SS")]
    InvalidTimecode(String),

    /// Clip range where start is not before end
    #[error("Invalid clip range: start ({start}) must be before end ({end})")]
    InvalidRange { start: String, end: String },

    /// Original video absent from the input directory
    #[error("Source video not found: {0}")]
    MissingSource(String),

    /// External transcoder failed or produced no output
    #[error("Transcode failed: {0}")]
    Transcode(String),

    /// Reading or writing a file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Directory or staging operation failed
    #[error("File system error: {0}")]
    FsFail(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DomainError {
    /// Wrap an I/O error together with the path it happened on
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        DomainError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
