use std::path::PathBuf;

/// Failure talking to the summarization/quiz backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("Server returned HTTP {status}")]
    Status {
        status: u16,
        /// The `error` field of the response body, when the backend sent one.
        message: Option<String>,
    },
    #[error("JSON error: {0}")]
    Decode(String),
}

impl BackendError {
    /// Text the backend itself reported, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            BackendError::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message.as_str()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::Decode(err.to_string())
        } else {
            BackendError::Transport(err.to_string())
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid backend URL {0:?}")]
    InvalidUrl(String),
    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}
