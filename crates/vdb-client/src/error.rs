//! Error types for the vector-database client.

use thiserror::Error;

/// Errors that can occur when talking to the service.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Request could not be sent or the connection failed
    #[error("Request failed: {0}")]
    Request(String),

    /// Service answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Service answered 429
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// GraphQL query returned errors and no data
    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// Response body was not what the endpoint documents
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Client could not be built from the given configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Whether a retry may succeed.
    ///
    /// Transport failures, rate limiting and server errors are transient;
    /// other client errors are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Request(_) | ClientError::RateLimitExceeded => true,
            ClientError::Http { status, .. } => *status >= 500,
            ClientError::GraphQl(_) | ClientError::Parse(_) | ClientError::Config(_) => false,
        }
    }
}
