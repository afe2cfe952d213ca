//! Error types shared by all handlers.

use http::StatusCode;
use serde::Serialize;
use std::fmt;

use crate::validate::ValidationError;

/// Result type alias used throughout the crate.
pub type Result<T, E = ApiError> = std::result::Result<T, E>;

/// Standard API error.
///
/// Every failure a handler can produce maps onto one of four statuses:
/// 400 (validation), 404 (not found), 409 (duplicate key on create) and
/// 500 (anything outside the taxonomy). Rendered as the failure envelope
/// `{"success": false, "message": ..., "errors": ...}`.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status code
    pub status: StatusCode,
    /// Human-readable error message
    pub message: String,
    /// First rule violation or raw error detail, if any
    pub errors: Option<String>,
}

impl ApiError {
    /// Create a new API error with an explicit status.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: None,
        }
    }

    /// 400 Bad Request carrying the first rule violation.
    pub fn validation(first_violation: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: "Validation failed".to_string(),
            errors: Some(first_violation.into()),
        }
    }

    /// 404 Not Found.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 409 Conflict for a duplicate key on create.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// 500 Internal Server Error with the raw error kept for diagnostics.
    pub fn internal(err: impl fmt::Display) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Something is wrong, please try again".to_string(),
            errors: Some(err.to_string()),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.errors {
            Some(detail) => write!(f, "{}: {}", self.message, detail),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.first_message().to_string())
    }
}

/// JSON body of an error response.
#[derive(Serialize)]
pub(crate) struct ErrorEnvelope {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<String>,
}

impl From<ApiError> for ErrorEnvelope {
    fn from(err: ApiError) -> Self {
        Self {
            success: false,
            message: err.message,
            errors: err.errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_carries_first_violation() {
        let err = ApiError::validation("studentId must be exactly 9 characters");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Validation failed");
        assert_eq!(
            err.errors.as_deref(),
            Some("studentId must be exactly 9 characters")
        );
    }

    #[test]
    fn internal_keeps_raw_error() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err = ApiError::internal(&io);
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Something is wrong, please try again");
        assert_eq!(err.errors.as_deref(), Some("boom"));
    }

    #[test]
    fn envelope_omits_empty_errors() {
        let envelope = ErrorEnvelope::from(ApiError::not_found("Student does not exists"));
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Student does not exists");
        assert!(json.get("errors").is_none());
    }
}
