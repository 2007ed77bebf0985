//! Error types for building the HTTP client

/// Errors while constructing an [`HttpTransport`](crate::HttpTransport)
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Endpoint is not an absolute http(s) URL
    #[error("invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint {
        /// Configured endpoint
        endpoint: String,
        /// Why it was rejected
        reason: String,
    },

    /// Underlying HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}
