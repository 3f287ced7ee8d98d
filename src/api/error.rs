//! Error types for remote API calls.

use thiserror::Error;

/// Errors that can occur while talking to the blog API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Request exceeded the configured timeout
    #[error("Request to {endpoint} timed out")]
    Timeout { endpoint: String },

    /// Could not reach the server
    #[error("Connection to {endpoint} failed: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    /// Response body was not the expected JSON
    #[error("Invalid response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Any other transport failure
    #[error("Request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    pub(crate) fn from_send(endpoint: &str, err: reqwest::Error) -> Self {
        let endpoint = endpoint.to_string();
        if err.is_timeout() {
            ApiError::Timeout { endpoint }
        } else if err.is_connect() {
            ApiError::Connect {
                endpoint,
                source: err,
            }
        } else {
            ApiError::Request {
                endpoint,
                source: err,
            }
        }
    }

    pub(crate) fn from_body(endpoint: &str, err: reqwest::Error) -> Self {
        let endpoint = endpoint.to_string();
        if err.is_timeout() {
            ApiError::Timeout { endpoint }
        } else {
            ApiError::Decode {
                endpoint,
                source: err,
            }
        }
    }

    /// Short message suitable for the status line.
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::ClientBuild(_) => "HTTP client unavailable",
            ApiError::Timeout { .. } => "The server took too long to respond",
            ApiError::Connect { .. } => "Could not reach the server",
            ApiError::Status { .. } => "The server rejected the request",
            ApiError::Decode { .. } => "The server sent an unexpected response",
            ApiError::Request { .. } => "The request failed",
        }
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
