//! Client Errors
//!
//! Outcomes of a failed backend call, classified by how the UI reacts.

use serde::Deserialize;

/// Longest plain-text body still shown to the user as-is
const MAX_PLAIN_MESSAGE_LEN: usize = 200;

/// Failed API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 401: the credential is missing, expired or revoked
    Unauthorized,
    /// 404: the requested record does not exist
    NotFound,
    /// Any other non-2xx status, with the server's message if it sent one
    Server { status: u16, message: Option<String> },
    /// The request never produced a response
    Network(String),
    /// A 2xx response whose body could not be read
    Decode(String),
}

/// What a failed protected call does to the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// Session is gone: show the expiry message, then log out after a pause
    Expire,
    /// Inline error message; the session stays
    Message(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ApiError {
    /// Classify a non-2xx response
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            404 => ApiError::NotFound,
            _ => ApiError::Server {
                status,
                message: server_message(body),
            },
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// How the UI answers this failure
    pub fn reaction(&self, fallback: &str) -> Reaction {
        if self.is_unauthorized() {
            Reaction::Expire
        } else {
            Reaction::Message(self.user_message(fallback))
        }
    }

    /// Text for an inline message: the server's own words when present,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Unauthorized => "Session expired. Please login again.".to_string(),
            ApiError::Server { message: Some(msg), .. } => msg.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// Accepts `{"message": ...}` / `{"error": ...}` JSON or a short plain-text body.
fn server_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed
            .message
            .or(parsed.error)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());
    }
    if body.starts_with('<') || body.chars().count() > MAX_PLAIN_MESSAGE_LEN {
        return None;
    }
    Some(body.to_string())
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Unauthorized => write!(f, "Unauthorized"),
            ApiError::NotFound => write!(f, "Not found"),
            ApiError::Server { status, message: Some(msg) } => write!(f, "Server error {}: {}", status, msg),
            ApiError::Server { status, message: None } => write!(f, "Server error {}", status),
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Decode(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = Result<T, ApiError>;
