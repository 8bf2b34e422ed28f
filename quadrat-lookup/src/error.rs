use quadrat_core::QuadratError;
use thiserror::Error;

/// Why a reference lookup produced no answer
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        last: Box<LookupError>,
    },
}

impl LookupError {
    /// Worth retrying: connection problems, throttling and server errors
    pub fn is_transient(&self) -> bool {
        match self {
            LookupError::Transport(_) => true,
            LookupError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            LookupError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            LookupError::Status {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else {
            LookupError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        LookupError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for LookupError {
    fn from(err: url::ParseError) -> Self {
        LookupError::InvalidRequest(err.to_string())
    }
}

impl From<LookupError> for QuadratError {
    fn from(err: LookupError) -> Self {
        QuadratError::Network(err.to_string())
    }
}
