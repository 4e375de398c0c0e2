//! Backend Errors
//!
//! Everything the hosted service can throw at us, plus the mapping from its
//! raw messages to text we show in a toast.

use serde::Deserialize;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("User not authenticated")]
    Unauthenticated,
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unexpected response: {0}")]
    Decode(String),
    #[error("Todo not found")]
    NotFound,
}

/// Known service messages and what we say instead
const FRIENDLY_MESSAGES: &[(&str, &str)] = &[
    ("invalid login credentials", "Invalid email or password"),
    ("user already registered", "An account with this email already exists"),
    ("email not confirmed", "Please confirm your email before signing in"),
    ("jwt expired", "Your session has expired. Please sign in again."),
    ("password should be at least", "Password must be at least 6 characters"),
    ("rate limit", "Too many attempts. Please wait a moment and try again."),
];

impl ApiError {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        ApiError::Http { status, message: message.into() }
    }

    /// 401/403 or an expired token: the session is no longer usable
    pub fn is_auth_failure(&self) -> bool {
        match self {
            ApiError::Unauthenticated => true,
            ApiError::Http { status, message } => {
                *status == 401 || *status == 403 || message.to_lowercase().contains("jwt expired")
            }
            _ => false,
        }
    }

    /// Text for a user-facing notification
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { message, .. } => {
                let lower = message.to_lowercase();
                FRIENDLY_MESSAGES
                    .iter()
                    .find(|(needle, _)| lower.contains(needle))
                    .map(|(_, friendly)| friendly.to_string())
                    .unwrap_or_else(|| message.clone())
            }
            ApiError::Network(_) => "Could not reach the server. Please check your connection.".to_string(),
            ApiError::Decode(_) => "The server sent an unexpected response. Please try again.".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::http(status.as_u16(), err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Error body shapes used by the auth and REST endpoints
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

/// Build an error from a non-success status and its raw body
pub fn error_from_body(status: u16, body: &str) -> ApiError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .msg
        .or(parsed.message)
        .or(parsed.error_description)
        .or(parsed.error)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("Request failed with status {}", status)
            } else {
                body.trim().to_string()
            }
        });
    ApiError::Http { status, message }
}
