//! Uniform success/failure result and response classification.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use super::RequestError;
use crate::transport::HttpResponse;

/// Outcome of every network-issuing operation.
///
/// Serializes to `{"ok": true, "data": ..., "status": N}` or
/// `{"ok": false, "error": "...", "status"?: N, "data"?: ...}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult {
    /// The server answered with a 2xx status.
    Success {
        /// Parsed JSON body, or the raw text when the body is not JSON
        data: Value,
        /// HTTP status
        status: u16,
    },
    /// Local validation failed or the server answered outside 2xx.
    Failure {
        /// Human-readable message
        error: String,
        /// HTTP status, absent for local failures
        status: Option<u16>,
        /// Response body, absent for local failures
        data: Option<Value>,
    },
}

impl ApiResult {
    /// Creates the failure result for a request rejected locally.
    #[must_use]
    pub fn rejected(error: &RequestError) -> Self {
        Self::Failure {
            error: error.to_string(),
            status: None,
            data: None,
        }
    }

    /// Classifies a transport response.
    ///
    /// Statuses in `[200, 300)` succeed with the JSON body, falling back to
    /// the raw text. Anything else fails with the raw text as error message
    /// (or the serialized data when the body is not text) and is logged at
    /// error level with status and `path`.
    #[must_use]
    pub fn from_response(response: &HttpResponse, path: &str) -> Self {
        let status = response.status.as_u16();
        let raw = response.body_text();
        let data = response
            .json()
            .or_else(|| raw.map(|text| Value::String(text.to_string())));

        if response.is_success() {
            return Self::Success {
                data: data.unwrap_or(Value::Null),
                status,
            };
        }

        let error_text = raw.map_or_else(
            || data.as_ref().map(Value::to_string).unwrap_or_default(),
            ToString::to_string,
        );
        tracing::error!(status, path, "request failed");

        let error = if error_text.is_empty() {
            format!("unexpected status {status}")
        } else {
            error_text
        };

        Self::Failure {
            error,
            status: Some(status),
            data,
        }
    }

    /// Returns true for [`ApiResult::Success`].
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// HTTP status, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Success { status, .. } => Some(*status),
            Self::Failure { status, .. } => *status,
        }
    }

    /// Response data, if any.
    #[must_use]
    pub const fn data(&self) -> Option<&Value> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Failure { data, .. } => data.as_ref(),
        }
    }

    /// Error message of a failure.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }
}

impl Serialize for ApiResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success { data, status } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("ok", &true)?;
                map.serialize_entry("data", data)?;
                map.serialize_entry("status", status)?;
                map.end()
            }
            Self::Failure {
                error,
                status,
                data,
            } => {
                let len = 2 + usize::from(status.is_some()) + usize::from(data.is_some());
                let mut map = serializer.serialize_map(Some(len))?;
                map.serialize_entry("ok", &false)?;
                map.serialize_entry("error", error)?;
                if let Some(status) = status {
                    map.serialize_entry("status", status)?;
                }
                if let Some(data) = data {
                    map.serialize_entry("data", data)?;
                }
                map.end()
            }
        }
    }
}
