//! Error types for the HTTP transport.

use thiserror::Error;

/// Error raised when a round trip could not produce an HTTP response.
///
/// A response with a non-2xx status is *not* an `HttpError`; those are
/// reported through [`crate::api::ApiResult::Failure`]. This type only
/// covers failures below the HTTP layer, which the request executor
/// passes through to its caller unchanged.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// TLS errors and bodies that could not be read.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built by the HTTP library.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
