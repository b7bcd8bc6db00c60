use crate::services::{validation::ValidationErrors, video_store::StoreError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Error returned by handlers; maps store failures onto HTTP responses.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    /// Field-level failures, rendered as the `errorsMessages` body.
    pub field_errors: Option<ValidationErrors>,
}

impl AppError {
    /// Create a new AppError with a specific status and message.
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: msg.into(),
            field_errors: None,
        }
    }

    /// Shortcut for a 500 Internal Server Error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }

    /// Shortcut for 404 Not Found
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, msg)
    }

    /// Shortcut for 400 Bad Request without field details
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg)
    }

    /// 400 carrying the full list of failed rules.
    pub fn validation(errors: ValidationErrors) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: errors.to_string(),
            field_errors: Some(errors),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(errors) = self.field_errors {
            return (self.status, Json(errors)).into_response();
        }

        // Missing resources are reported by status alone.
        if self.status == StatusCode::NOT_FOUND {
            return self.status.into_response();
        }

        if self.status.is_server_error() {
            tracing::error!(status = self.status.as_u16(), "{}", self.message);
        }

        let body = Json(json!({
            "error": self.message,
            "status": self.status.as_u16()
        }));

        (self.status, body).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let message = err.to_string();
        match err {
            StoreError::NotFound(_) => AppError::not_found(message),
            StoreError::Validation(errors) => AppError::validation(errors),
            StoreError::Poisoned => AppError::internal(message),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::validation::FieldError;

    #[test]
    fn store_errors_map_to_statuses() {
        assert_eq!(
            AppError::from(StoreError::NotFound(3)).status,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(StoreError::Poisoned).status,
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let errors = ValidationErrors {
            errors_messages: vec![FieldError {
                message: "Title can't be empty".into(),
                field: "title",
            }],
        };
        let app_err = AppError::from(StoreError::Validation(errors.clone()));
        assert_eq!(app_err.status, StatusCode::BAD_REQUEST);
        assert_eq!(app_err.field_errors, Some(errors));
    }

    #[test]
    fn not_found_has_no_body_detail() {
        let response = AppError::not_found("video `1` not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get(axum::http::header::CONTENT_TYPE).is_none());
    }
}
