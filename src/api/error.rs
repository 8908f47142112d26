//! Error types for request building and the smoke test.

use thiserror::Error;

use crate::transport::HttpError;

/// A request rejected before any network activity.
///
/// These never escape as `Err`; they are rendered into
/// [`super::ApiResult::Failure`] without a status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// No token from override, settings or environment.
    #[error("missing access token")]
    MissingToken,

    /// The path was empty after trimming.
    #[error("missing path")]
    MissingPath,

    /// Contact update without an id.
    #[error("missing id")]
    MissingId,

    /// Search query absent or not a JSON object.
    #[error("missing query")]
    MissingQuery,

    /// Contact creation without email, phone or external id.
    #[error("email, phone, or externalId required")]
    MissingIdentifier,

    /// The explicit method is not a valid HTTP method token.
    #[error("invalid method '{0}'")]
    InvalidMethod(String),

    /// A header name or value could not be encoded.
    #[error("invalid header '{name}': {reason}")]
    InvalidHeader {
        /// Header name as supplied
        name: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Base URL, path and query did not form a valid URL.
    #[error("invalid url '{url}': {reason}")]
    InvalidUrl {
        /// The composed URL
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// The request body could not be serialized.
    #[error("invalid body: {0}")]
    InvalidBody(String),
}

/// Error type for [`super::Intercom::self_test`].
#[derive(Debug, Error)]
pub enum SelfTestError {
    /// `GET /me` did not return a success result.
    #[error("self test failed: {error}")]
    Failed {
        /// HTTP status, absent for local failures
        status: Option<u16>,
        /// Error text from the failure result
        error: String,
    },

    /// The transport could not complete the round trip.
    #[error("self test failed: {0}")]
    Transport(#[from] HttpError),
}
