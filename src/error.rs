//! Error types for the logo grid core

use thiserror::Error;

/// Result type alias for grid operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the logo grid core
#[derive(Error, Debug)]
pub enum Error {
    /// A form or input failed validation (nothing was changed)
    #[error("{0}")]
    Validation(String),

    /// Rasterizing or encoding an export failed
    #[error("Export failed: {0}")]
    Export(String),

    /// No credential was supplied to the persistence adapter
    #[error("No GitHub token configured")]
    MissingCredential,

    /// The remote store rejected a read or write
    #[error("Persistence failed: {0}")]
    Persistence(String),

    /// Transport-level network error
    #[error("Network error: {0}")]
    Network(String),

    /// Member data could not be read or parsed
    #[error("Invalid member data: {0}")]
    Data(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The background worker went away before answering
    #[error("Worker error: {0}")]
    Worker(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Data(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Data(err.to_string())
    }
}

#[cfg(feature = "remote")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}
