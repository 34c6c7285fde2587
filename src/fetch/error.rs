//! Error types for HTTP operations.

use thiserror::Error;

/// Error type for HTTP operations.
///
/// Non-2xx statuses are not errors at this layer; callers inspect
/// [`HttpResponse::status`](super::HttpResponse).
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed, including DNS failures and broken bodies.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The URL could not be built or was rejected by the client.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
