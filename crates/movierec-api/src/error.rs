//! Typed failures raised by the HTTP client wrapper.

use reqwest::StatusCode;
use serde_json::Value;

/// Error returned by [`crate::ApiClient`] requests.
///
/// Facades return `anyhow::Result`; this type is the root cause inside the
/// chain so callers can classify failures with [`ApiError::classify`].
#[derive(Debug, thiserror::Error)]
#[allow(clippy::module_name_repetitions)]
pub enum ApiError {
    /// The backend rejected the credentials (HTTP 401). The session has
    /// already been cleared when this is returned.
    #[error("authentication required: {message}")]
    Unauthorized {
        /// Message extracted from the response body.
        message: String,
    },

    /// The requested resource does not exist (HTTP 404).
    #[error("resource not found: {path}")]
    NotFound {
        /// Request path relative to the API root.
        path: String,
    },

    /// Any other non-success status.
    #[error("API error (HTTP {status}): {message}")]
    Status {
        /// Response status.
        status: StatusCode,
        /// Message extracted from the response body.
        message: String,
    },

    /// The request never produced a response.
    #[error("request failed: {path}")]
    Transport {
        /// Request path relative to the API root.
        path: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The response body was not the expected JSON.
    #[error("failed to decode JSON response: {path}")]
    Decode {
        /// Request path relative to the API root.
        path: String,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// The path could not be joined onto the base URL.
    #[error("failed to join URL path: {path}")]
    InvalidPath {
        /// Offending path.
        path: String,
        /// Underlying parse error.
        #[source]
        source: url::ParseError,
    },
}

/// Coarse failure category used by page controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// HTTP 401.
    Unauthorized,
    /// HTTP 404.
    NotFound,
    /// Anything else, including errors that did not come from the client.
    Other,
}

impl ApiError {
    /// Finds the first `ApiError` in an `anyhow` chain and returns its kind.
    #[must_use]
    pub fn classify(err: &anyhow::Error) -> ErrorKind {
        match err.chain().find_map(|cause| cause.downcast_ref::<Self>()) {
            Some(Self::Unauthorized { .. }) => ErrorKind::Unauthorized,
            Some(Self::NotFound { .. }) => ErrorKind::NotFound,
            _ => ErrorKind::Other,
        }
    }

    /// Returns the backend-provided message, if the chain carries one.
    #[must_use]
    pub fn backend_message(err: &anyhow::Error) -> Option<&str> {
        err.chain()
            .find_map(|cause| cause.downcast_ref::<Self>())
            .and_then(|api_err| match api_err {
                Self::Status { message, .. } | Self::Unauthorized { message } => {
                    Some(message.as_str())
                }
                _ => None,
            })
    }
}

/// Extracts a human-readable message from an error response body.
///
/// Looks at `error`, `detail`, `message`, then the first field error
/// (`{"field": ["msg"]}`); falls back to the raw body.
pub(crate) fn extract_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.trim().to_owned();
    };

    for key in ["error", "detail", "message"] {
        if let Some(text) = value.get(key).and_then(Value::as_str) {
            return text.to_owned();
        }
    }

    if let Some(object) = value.as_object() {
        for (field, errors) in object {
            let first = match errors {
                Value::Array(items) => items.first().and_then(Value::as_str),
                Value::String(text) => Some(text.as_str()),
                _ => None,
            };
            if let Some(text) = first {
                return format!("{field}: {text}");
            }
        }
    }

    body.trim().to_owned()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use anyhow::Context;

    use super::*;

    #[test]
    fn test_extract_message_error_key() {
        // Arrange
        let body = r#"{"error":"Invalid credentials"}"#;

        // Act
        let message = extract_message(body);

        // Assert
        assert_eq!(message, "Invalid credentials");
    }

    #[test]
    fn test_extract_message_detail_key() {
        // Arrange
        let body = r#"{"detail":"Authentication credentials were not provided."}"#;

        // Act & Assert
        assert_eq!(
            extract_message(body),
            "Authentication credentials were not provided."
        );
    }

    #[test]
    fn test_extract_message_field_errors() {
        // Arrange
        let body = r#"{"query":["Search query must be at least 2 characters long."]}"#;

        // Act & Assert
        assert_eq!(
            extract_message(body),
            "query: Search query must be at least 2 characters long."
        );
    }

    #[test]
    fn test_extract_message_plain_text() {
        // Arrange & Act & Assert
        assert_eq!(extract_message("Bad Gateway\n"), "Bad Gateway");
    }

    #[test]
    fn test_classify_through_context() {
        // Arrange
        let err = Err::<(), _>(ApiError::NotFound {
            path: String::from("movies/1/"),
        })
        .context("failed to load movie")
        .unwrap_err();

        // Act & Assert
        assert_eq!(ApiError::classify(&err), ErrorKind::NotFound);
    }

    #[test]
    fn test_classify_foreign_error() {
        // Arrange
        let err = anyhow::anyhow!("something else");

        // Act & Assert
        assert_eq!(ApiError::classify(&err), ErrorKind::Other);
        assert!(ApiError::backend_message(&err).is_none());
    }
}
