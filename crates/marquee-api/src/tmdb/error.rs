use thiserror::Error;

/// Errors from the TMDB API client.
#[derive(Debug, Error)]
pub enum TmdbError {
    /// Transport failure. The request URL is stripped since it carries the key.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for TmdbError {
    fn from(e: reqwest::Error) -> Self {
        TmdbError::Http(e.without_url())
    }
}
