use reqwest::StatusCode;
use thiserror::Error;

use crate::models::ErrorBody;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized - session is no longer valid")]
    Unauthorized { body: String },

    #[error("Access denied: {}", truncate_body(.0))]
    AccessDenied(String),

    #[error("Resource not found: {}", truncate_body(.0))]
    NotFound(String),

    #[error("Conflict: {}", truncate_body(.0))]
    Conflict(String),

    #[error("Rate limited: {}", truncate_body(.0))]
    RateLimited(String),

    #[error("Server error ({status}): {}", truncate_body(.body))]
    ServerError { status: StatusCode, body: String },

    #[error("Request failed ({status}): {}", truncate_body(.body))]
    Http { status: StatusCode, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

/// Maximum length for response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Shorten a response body for display. The error value keeps the full body.
fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY_LENGTH;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
}

impl ApiError {
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let body = body.to_string();
        match status.as_u16() {
            401 => ApiError::Unauthorized { body },
            403 => ApiError::AccessDenied(body),
            404 => ApiError::NotFound(body),
            409 => ApiError::Conflict(body),
            429 => ApiError::RateLimited(body),
            500..=599 => ApiError::ServerError { status, body },
            _ => ApiError::Http { status, body },
        }
    }

    /// The HTTP status the backend answered with, if a response arrived.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            ApiError::AccessDenied(_) => Some(StatusCode::FORBIDDEN),
            ApiError::NotFound(_) => Some(StatusCode::NOT_FOUND),
            ApiError::Conflict(_) => Some(StatusCode::CONFLICT),
            ApiError::RateLimited(_) => Some(StatusCode::TOO_MANY_REQUESTS),
            ApiError::ServerError { status, .. } | ApiError::Http { status, .. } => Some(*status),
            ApiError::Network(e) => e.status(),
            ApiError::InvalidResponse(_) | ApiError::InvalidHeader(_) => None,
        }
    }

    /// The untruncated response body of an HTTP error.
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { body }
            | ApiError::ServerError { body, .. }
            | ApiError::Http { body, .. } => Some(body),
            ApiError::AccessDenied(body)
            | ApiError::NotFound(body)
            | ApiError::Conflict(body)
            | ApiError::RateLimited(body) => Some(body),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// The backend's human-readable message, falling back to the error itself.
    pub fn message(&self) -> String {
        self.body()
            .and_then(ErrorBody::parse)
            .and_then(|b| b.message.or(b.error))
            .unwrap_or_else(|| self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_mapping() {
        assert!(ApiError::from_status(StatusCode::UNAUTHORIZED, "").is_unauthorized());
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, "no"),
            ApiError::AccessDenied(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, ""),
            ApiError::ServerError { .. }
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_REQUEST, ""),
            ApiError::Http { .. }
        ));
    }

    #[test]
    fn test_status_and_body_are_preserved() {
        let body = "x".repeat(2000);
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, &body);
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(err.body(), Some(body.as_str()));
        // Display is truncated, the body is not
        assert!(err.to_string().contains("truncated, 2000 total bytes"));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let body = "ñ".repeat(400);
        let shown = truncate_body(&body);
        assert!(shown.contains("truncated"));
    }

    #[test]
    fn test_message_prefers_backend_text() {
        let err = ApiError::from_status(
            StatusCode::CONFLICT,
            r#"{"status":409,"error":"Conflict","mensaje":"El email ya está registrado"}"#,
        );
        assert_eq!(err.message(), "El email ya está registrado");

        let err = ApiError::from_status(StatusCode::NOT_FOUND, "plain");
        assert_eq!(err.message(), "Resource not found: plain");
    }
}
