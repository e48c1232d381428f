use thiserror::Error;

/// Errors produced while building or delivering a notification.
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Invalid message: {message}")]
    InvalidMessage { message: String },

    #[error("Transport error: {message}")]
    Transport { message: String },
}

impl NotificationError {
    /// Create a new InvalidMessage error
    pub fn invalid_message(message: impl Into<String>) -> Self {
        Self::InvalidMessage {
            message: message.into(),
        }
    }

    /// Create a new Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}
