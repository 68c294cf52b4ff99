//! Error types for the music site client.

use thiserror::Error;

/// Errors that can occur when talking to the music site.
#[derive(Error, Debug)]
pub enum SiteClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Site returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Authentication required and the anonymous fallback was refused
    #[error("Authentication required")]
    AuthRequired,

    /// Invalid site URL
    #[error("Invalid site URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a site response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// IO error while writing a download
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Site is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

impl SiteClientError {
    /// Classify a transport error, separating unreachable-site cases
    /// from other request failures.
    pub(crate) fn from_send(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            SiteClientError::ServerUnreachable(e.to_string())
        } else {
            SiteClientError::Request(e)
        }
    }
}

/// Result type for site client operations.
pub type Result<T> = std::result::Result<T, SiteClientError>;
