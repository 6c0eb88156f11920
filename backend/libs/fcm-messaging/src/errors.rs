use thiserror::Error;

/// FCM Messaging Error Types
#[derive(Error, Debug)]
pub enum MessagingError {
    #[error("Failed to serialize FCM message: {0}")]
    Serialization(String),

    #[error("Invalid FCM message: {0}")]
    Validation(String),

    #[error("FCM request failed: {0}")]
    Transport(String),

    #[error("FCM API error: {status} - {body}")]
    RemoteRejection { status: u16, body: String },

    #[error("FCM authorization key not set")]
    MissingCredential,

    #[error("FCM configuration error: {0}")]
    Config(String),
}

impl MessagingError {
    /// HTTP status of a remote rejection
    pub fn status(&self) -> Option<u16> {
        match self {
            MessagingError::RemoteRejection { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for MessagingError {
    fn from(err: serde_json::Error) -> Self {
        MessagingError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for MessagingError {
    fn from(err: reqwest::Error) -> Self {
        MessagingError::Transport(err.to_string())
    }
}

impl From<MessagingError> for String {
    fn from(err: MessagingError) -> Self {
        err.to_string()
    }
}
