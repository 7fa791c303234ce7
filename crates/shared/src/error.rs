//! Shared error types including RFC7807 Problem Details.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// RFC7807 Problem Details (application/problem+json)
///
/// The ALM API answers failed `/api/v1/*` calls with this envelope so the
/// client can show the server's explanation instead of a bare status code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProblemDetails {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type", default)]
    pub type_url: String,
    /// A short, human-readable summary of the problem type.
    pub title: String,
    /// HTTP status code.
    pub status: u16,
    /// Human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// A URI reference that identifies the specific occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

/// Attempt to parse an RFC7807 (or RFC7807-ish) JSON body into a user-facing message.
/// Prefers `detail`, falls back to `title`.
pub fn try_problem_detail(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ProblemDetails>(body).ok()?;
    if let Some(detail) = parsed.detail {
        if !detail.trim().is_empty() {
            return Some(detail);
        }
    }
    if !parsed.title.trim().is_empty() {
        return Some(parsed.title);
    }
    None
}

/// API error type for client-side use
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

impl ApiError {
    /// Message suitable for an inline form error.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { status: 401, .. } => "Your session has expired. Sign in again.".to_string(),
            ApiError::Http { body, .. } => {
                try_problem_detail(body).unwrap_or_else(|| self.to_string())
            }
            _ => self.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Http { status: 401, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn problem_detail_prefers_detail_over_title() {
        let body = r#"{"type":"about:blank","title":"Conflict","status":409,"detail":"Project key ALM is taken"}"#;
        assert_eq!(try_problem_detail(body).as_deref(), Some("Project key ALM is taken"));

        let body = r#"{"title":"Forbidden","status":403,"detail":"  "}"#;
        assert_eq!(try_problem_detail(body).as_deref(), Some("Forbidden"));

        assert_eq!(try_problem_detail("<html>oops</html>"), None);
    }

    #[test]
    fn user_message_unwraps_problem_bodies() {
        let err = ApiError::Http {
            status: 409,
            body: r#"{"title":"Conflict","status":409,"detail":"Already linked"}"#.to_string(),
        };
        assert_eq!(err.user_message(), "Already linked");

        let err = ApiError::Http {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.user_message(), "HTTP 500: boom");
        assert!(!err.is_unauthorized());
    }
}
