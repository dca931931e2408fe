//! Error types for the fact service

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that escape the fact pipeline
///
/// Text-generation failures never show up here; they are absorbed inside
/// the service and replaced with the original fact text.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fact store error: {0}")]
    Store(String),

    #[error("Request signing failed: {0}")]
    Signing(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Internal(format!("JSON error: {}", e))
    }
}
