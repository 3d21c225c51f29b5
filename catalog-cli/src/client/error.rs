use thiserror::Error;

/// Message used when a failed response carries no usable `detail`.
pub const GENERIC_API_FAILURE: &str = "API request failed";

/// Client-related errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// No response was received.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success status; `message` is the server's `detail`.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
