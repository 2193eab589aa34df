use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    /// Malformed or missing manifest entry, or an invalid setting.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A caller asked about something the registry never contained.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("manifest parse error: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("settings error: {0}")]
    Settings(#[from] confy::ConfyError),
}

impl ViewerError {
    pub fn config(msg: impl Into<String>) -> Self {
        ViewerError::Configuration(msg.into())
    }

    pub fn unknown_part(id: &str) -> Self {
        ViewerError::InvariantViolation(format!("unknown part id `{id}`"))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, ViewerError::Configuration(_))
    }

    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, ViewerError::InvariantViolation(_))
    }
}

pub type Result<T> = std::result::Result<T, ViewerError>;
