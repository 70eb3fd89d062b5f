//! Error handling module for the dashboard client.
//!
//! Provides the client error type and the single policy that maps a failed
//! call to what a page should do about it.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const HTTP_ERROR: &str = "HTTP_ERROR";
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    pub const DECODE_ERROR: &str = "DECODE_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
}

/// Message shown for failures the user can do nothing specific about.
pub const GENERIC_MESSAGE: &str = "Something went wrong. Please try again.";

/// Client error type.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend answered with a non-success status
    #[error("HTTP {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Http {
        status: StatusCode,
        detail: Option<String>,
    },

    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Input rejected locally before any request was made
    #[error("Validation error: {0}")]
    Validation(String),

    /// Local storage could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// HTTP status of the failed call, if the backend answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            ClientError::Network(err) => err.status(),
            _ => None,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Http { status, .. } if *status == StatusCode::UNAUTHORIZED => {
                codes::UNAUTHORIZED
            }
            ClientError::Http { .. } => codes::HTTP_ERROR,
            ClientError::Network(_) => codes::NETWORK_ERROR,
            ClientError::Decode(_) => codes::DECODE_ERROR,
            ClientError::Validation(_) => codes::VALIDATION_ERROR,
            ClientError::Storage(_) => codes::STORAGE_ERROR,
            ClientError::Config(_) => codes::CONFIG_ERROR,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::Validation(message.into())
    }
}

/// What a page should do with a failed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorAction {
    /// Session is gone; navigate to the sign-in route
    RedirectToLogin,
    /// Show the message next to the form that triggered the call
    Inline(String),
    /// Show the generic failure string
    Generic(String),
}

/// Map a failed call to the page-level reaction.
///
/// This is the only place status codes are interpreted; every page goes
/// through it instead of checking statuses itself.
pub fn decide(err: &ClientError) -> ErrorAction {
    match err {
        ClientError::Http { status, .. } if *status == StatusCode::UNAUTHORIZED => {
            ErrorAction::RedirectToLogin
        }
        ClientError::Http {
            status,
            detail: Some(detail),
        } if status.is_client_error() => ErrorAction::Inline(detail.clone()),
        ClientError::Validation(message) => ErrorAction::Inline(message.clone()),
        _ => ErrorAction::Generic(GENERIC_MESSAGE.to_string()),
    }
}

/// Error body returned by the backend.
///
/// `detail` is a plain string for business errors and a list of field errors
/// for request validation failures.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Fields(Vec<FieldError>),
}

#[derive(Debug, Deserialize)]
pub struct FieldError {
    pub msg: String,
    #[serde(default)]
    pub loc: Vec<serde_json::Value>,
}

/// Extract the human-readable message from an error body, if there is one.
pub fn detail_from_body(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        ErrorDetail::Message(message) if !message.trim().is_empty() => Some(message),
        ErrorDetail::Message(_) => None,
        ErrorDetail::Fields(fields) => fields.into_iter().next().map(|field| {
            match field.loc.last().and_then(|v| v.as_str()) {
                Some(name) => format!("{}: {}", name, field.msg),
                None => field.msg,
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16, detail: Option<&str>) -> ClientError {
        ClientError::Http {
            status: StatusCode::from_u16(status).unwrap(),
            detail: detail.map(str::to_string),
        }
    }

    #[test]
    fn test_unauthorized_redirects() {
        assert_eq!(
            decide(&http(401, Some("Not authenticated"))),
            ErrorAction::RedirectToLogin
        );
        assert_eq!(decide(&http(401, None)), ErrorAction::RedirectToLogin);
    }

    #[test]
    fn test_client_error_with_detail_is_inline() {
        assert_eq!(
            decide(&http(400, Some("Email already registered"))),
            ErrorAction::Inline("Email already registered".to_string())
        );
        assert_eq!(
            decide(&http(403, Some("Only organization owner can invite as owner"))),
            ErrorAction::Inline("Only organization owner can invite as owner".to_string())
        );
    }

    #[test]
    fn test_server_and_bare_errors_are_generic() {
        let generic = ErrorAction::Generic(GENERIC_MESSAGE.to_string());
        assert_eq!(decide(&http(500, Some("Registration failed"))), generic);
        assert_eq!(decide(&http(404, None)), generic);
        assert_eq!(decide(&ClientError::Storage("disk full".into())), generic);
    }

    #[test]
    fn test_local_validation_is_inline() {
        assert_eq!(
            decide(&ClientError::validation("Password must be at least 8 characters")),
            ErrorAction::Inline("Password must be at least 8 characters".to_string())
        );
    }

    #[test]
    fn test_detail_from_body() {
        assert_eq!(
            detail_from_body(r#"{"detail":"Invitation not found"}"#).as_deref(),
            Some("Invitation not found")
        );
        assert_eq!(
            detail_from_body(
                r#"{"detail":[{"loc":["body","email"],"msg":"value is not a valid email address","type":"value_error"}]}"#
            )
            .as_deref(),
            Some("email: value is not a valid email address")
        );
        assert_eq!(detail_from_body(r#"{"detail":""}"#), None);
        assert_eq!(detail_from_body("Internal Server Error"), None);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(http(401, None).error_code(), codes::UNAUTHORIZED);
        assert_eq!(http(409, None).error_code(), codes::HTTP_ERROR);
        assert_eq!(
            ClientError::validation("Name is required").error_code(),
            codes::VALIDATION_ERROR
        );
        assert_eq!(
            ClientError::Storage("disk full".into()).error_code(),
            codes::STORAGE_ERROR
        );
        assert!(http(401, None).is_unauthorized());
        assert!(!http(403, None).is_unauthorized());
    }
}
