use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A failed remote fetch. Network, HTTP status and decoding failures are
/// not distinguished; only the message survives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FetchError {
    message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The message to show on screen, or `default` when the source error
    /// had nothing to say.
    pub fn display_message(&self, default: &str) -> String {
        if self.message.trim().is_empty() {
            default.to_string()
        } else {
            self.message.clone()
        }
    }
}
