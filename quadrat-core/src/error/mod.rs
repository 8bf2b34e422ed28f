//! Errors raised around the interpreters
//!
//! Interpreters never fail; they report through `ParseOutcome` and issue
//! flags. `QuadratError` covers what surrounds them: reading configuration,
//! reading and writing records, and talking to lookup services.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuadratError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A record or report could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Unreadable config file, bad value, or refused override
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(String),

    /// Unknown vocabulary value or malformed input line
    #[error("Parsing error: {0}")]
    Parse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Other(String),
}

pub type QuadratResult<T> = Result<T, QuadratError>;

impl QuadratError {
    /// Process exit status for a command that failed with this error
    pub fn exit_code(&self) -> i32 {
        match self {
            QuadratError::Configuration(_) => 2,
            QuadratError::Io(_) => 3,
            QuadratError::Parse(_) | QuadratError::Serialization(_) => 4,
            _ => 1,
        }
    }
}

impl From<serde_json::Error> for QuadratError {
    fn from(err: serde_json::Error) -> Self {
        QuadratError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for QuadratError {
    fn from(err: toml::de::Error) -> Self {
        QuadratError::Configuration(format!("Failed to parse config: {}", err))
    }
}

impl From<toml::ser::Error> for QuadratError {
    fn from(err: toml::ser::Error) -> Self {
        QuadratError::Configuration(format!("Failed to serialize config: {}", err))
    }
}

impl From<anyhow::Error> for QuadratError {
    fn from(err: anyhow::Error) -> Self {
        QuadratError::Other(format!("{:#}", err))
    }
}
