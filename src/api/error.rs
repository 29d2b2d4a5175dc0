//! API error types for JIRA client.

use thiserror::Error;

/// Errors that can occur when interacting with the JIRA API.
///
/// The kind says where the failure happened, not whether it is worth retrying;
/// the client never retries on its own.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server could not be reached (connection refused, TLS failure, timeout).
    #[error("Connection failed: {0}")]
    ConnectionFailed(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{}", remote_display(.status, .message))]
    Remote {
        /// The HTTP status code, when one was received.
        status: Option<u16>,
        /// Server-provided or canonical reason text.
        message: String,
    },

    /// The response body was not valid JSON or lacked the expected structure.
    #[error("Invalid API response: {0}")]
    Parse(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

fn remote_display(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("JIRA returned HTTP {}: {}", code, message),
        None => format!("JIRA request failed: {}", message),
    }
}

impl ApiError {
    /// Create an error from an HTTP status code and a message.
    pub fn from_status(status: reqwest::StatusCode, message: &str) -> Self {
        let message = if message.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("Unknown status")
                .to_string()
        } else {
            message.to_string()
        };

        ApiError::Remote {
            status: Some(status.as_u16()),
            message,
        }
    }

    /// The HTTP status code, if the server answered.
    ///
    /// For transport failures reqwest may still know a status (e.g. a
    /// failed body read after headers arrived).
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Remote { status, .. } => *status,
            ApiError::ConnectionFailed(e) => e.status().map(|s| s.as_u16()),
            ApiError::Parse(_) => None,
        }
    }

    /// Human-readable detail without the kind prefix.
    pub fn message(&self) -> String {
        match self {
            ApiError::Remote { message, .. } => message.clone(),
            ApiError::ConnectionFailed(e) => e.to_string(),
            ApiError::Parse(msg) => msg.clone(),
        }
    }

    /// Whether the server rejected the credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Remote { status: Some(401), .. })
    }

    /// Whether the server could not be reached at all.
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, ApiError::ConnectionFailed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_error_from_status_keeps_code_and_message() {
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, "Error in the JQL Query");
        assert_eq!(err.status_code(), Some(400));
        assert_eq!(err.message(), "Error in the JQL Query");
    }

    #[test]
    fn test_error_from_status_empty_message_uses_reason() {
        let err = ApiError::from_status(StatusCode::NOT_FOUND, "");
        assert_eq!(err.message(), "Not Found");
    }

    #[test]
    fn test_error_from_status_401_is_unauthorized() {
        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, "");
        assert!(err.is_unauthorized());
        assert!(!err.is_connection_failure());
    }

    #[test]
    fn test_parse_error_has_no_status() {
        let err = ApiError::Parse("expected object".to_string());
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert_eq!(err.to_string(), "JIRA returned HTTP 500: boom");

        let err = ApiError::Remote {
            status: None,
            message: "gateway closed".to_string(),
        };
        assert_eq!(err.to_string(), "JIRA request failed: gateway closed");

        let err = ApiError::Parse("not JSON".to_string());
        assert_eq!(err.to_string(), "Invalid API response: not JSON");
    }
}
