//! Error types for groupcal.

use thiserror::Error;

/// Errors that can occur in groupcal operations.
#[derive(Error, Debug)]
pub enum GroupCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not reach the server: {0}")]
    Transport(String),

    #[error("Request failed (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Only group administrators can {0}")]
    NotAdministrator(&'static str),

    #[error("You cannot change your own administrator role")]
    SelfRoleChange,

    #[error("Member has no user id: {0}")]
    MissingUserId(String),

    #[error("Invalid time '{0}'")]
    InvalidTime(String),

    #[error("The view moved on before the response arrived")]
    Superseded,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl GroupCalError {
    /// True for failures caused by missing or insufficient credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GroupCalError::Api { status: 401 | 403, .. })
    }

    /// True when a newer load or a group switch made this response obsolete.
    pub fn is_superseded(&self) -> bool {
        matches!(self, GroupCalError::Superseded)
    }
}

impl From<reqwest::Error> for GroupCalError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            GroupCalError::Serialization(e.to_string())
        } else {
            GroupCalError::Transport(e.to_string())
        }
    }
}

/// Result type alias for groupcal operations.
pub type GroupCalResult<T> = Result<T, GroupCalError>;
