//! API Errors
//!
//! Error taxonomy for REST calls and the status/body interpretation shared by
//! every request.

use serde_json::Value;
use thiserror::Error;

use super::session::Session;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    /// Session expired; credentials were already cleared.
    #[error("Session expired")]
    Unauthorized,
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("Failed to parse response: {0}")]
    Malformed(String),
    #[error("Invalid API configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// 401 is handled globally (redirect), so callers should not toast it.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

/// User-facing message for a failed response.
///
/// Uses the JSON `detail` or `message` string when present; anything else is
/// reduced to the HTTP status.
pub fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            ["detail", "message"]
                .iter()
                .find_map(|key| json.get(key).and_then(Value::as_str).map(str::to_string))
        })
        .filter(|msg| !msg.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP error! status: {}", status))
}

/// Map a response status to success or an `ApiError`.
///
/// A 401 clears the session and sends the browser to login before the error
/// is returned.
pub fn check_status(status: u16, body: &str, session: &dyn Session) -> Result<(), ApiError> {
    if status == 401 {
        log::warn!(target: "API", "unauthorized, clearing session and redirecting to login");
        session.clear();
        session.redirect_to_login();
        return Err(ApiError::Unauthorized);
    }
    if !(200..300).contains(&status) {
        return Err(ApiError::Status {
            status,
            message: error_message(status, body),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::session::MemorySession;

    #[test]
    fn test_error_message_prefers_detail() {
        assert_eq!(error_message(404, r#"{"detail": "Case not found"}"#), "Case not found");
        assert_eq!(error_message(400, r#"{"message": "Bad filter"}"#), "Bad filter");
    }

    #[test]
    fn test_error_message_generic_fallback() {
        assert_eq!(error_message(502, "<html>Bad Gateway</html>"), "HTTP error! status: 502");
        assert_eq!(error_message(500, ""), "HTTP error! status: 500");
        // FastAPI validation errors carry a list, not a string
        assert_eq!(
            error_message(422, r#"{"detail": [{"loc": ["body"], "msg": "field required"}]}"#),
            "HTTP error! status: 422"
        );
    }

    #[test]
    fn test_unauthorized_clears_session_and_redirects() {
        let session = MemorySession::with_token("abc");
        let result = check_status(401, "", &session);
        assert_eq!(result, Err(ApiError::Unauthorized));
        assert!(session.token().is_none());
        assert_eq!(session.redirects(), 1);
    }

    #[test]
    fn test_non_success_keeps_session() {
        let session = MemorySession::with_token("abc");
        let result = check_status(500, r#"{"detail": "boom"}"#, &session);
        assert_eq!(
            result,
            Err(ApiError::Status {
                status: 500,
                message: "boom".to_string()
            })
        );
        assert_eq!(session.token().as_deref(), Some("abc"));
        assert_eq!(session.redirects(), 0);
        assert!(check_status(204, "", &session).is_ok());
    }
}
