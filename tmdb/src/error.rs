//! Error types for the TMDB client

use marquee_feed::TransportError;
use marquee_feed::config::ConfigError;
use thiserror::Error;

/// Errors that can occur when talking to TMDB
#[derive(Debug, Error)]
pub enum TmdbError {
    /// Missing `TMDB_API_KEY` environment variable
    #[error("Missing TMDB_API_KEY environment variable")]
    MissingApiKey,

    /// Invalid client configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// HTTP request failed before a response arrived
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body did not match the expected shape
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// Rate limited - too many requests
    #[error("Rate limited - too many requests")]
    RateLimited,

    /// Unauthorized - invalid API key
    #[error("Unauthorized - invalid API key")]
    Unauthorized,

    /// API returned an error
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },
}

impl From<TmdbError> for TransportError {
    fn from(error: TmdbError) -> Self {
        match error {
            TmdbError::RequestFailed(message) => Self::Request(message),
            TmdbError::ResponseParseFailed(message) => Self::Decode(message),
            TmdbError::ApiError { status, message } => Self::Status { status, message },
            error @ TmdbError::RateLimited => Self::Status {
                status: 429,
                message: error.to_string(),
            },
            error @ TmdbError::Unauthorized => Self::Status {
                status: 401,
                message: error.to_string(),
            },
            error @ (TmdbError::MissingApiKey | TmdbError::Config(_)) => {
                Self::Request(error.to_string())
            },
        }
    }
}
