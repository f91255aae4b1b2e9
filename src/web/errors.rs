//! # Web API Error Types
//!
//! Errors specific to the web layer and their HTTP renderings. The mapping
//! implements the three-outcome contract: ownership violations surface as
//! 404 regardless of whether the record exists, anonymous access to a
//! protected route becomes a `302` redirect to the login form with a
//! `next` parameter, and unexpected failures become plain 500s.

use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::constants::paths;
use crate::web::responses::redirect_found;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Resource not found")]
    NotFound,

    #[error("Login required")]
    LoginRequired { next: String },

    #[error("Invalid request: {message}")]
    BadRequest { message: String },

    #[error("Database operation failed: {operation}")]
    DatabaseError { operation: String },

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    /// Build the anonymous-access rejection for a request URI; the full
    /// path and query round-trip through the login form's `next` target.
    pub fn login_required(uri: &Uri) -> Self {
        let next = uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| uri.path())
            .to_string();
        Self::LoginRequired { next }
    }

    /// Create a BadRequest error with a custom message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create a DatabaseError with operation context.
    pub fn database_error(operation: impl Into<String>) -> Self {
        Self::DatabaseError {
            operation: operation.into(),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound,
            other => ApiError::DatabaseError {
                operation: other.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({"error": "not_found", "message": "Resource not found"})),
            )
                .into_response(),

            ApiError::LoginRequired { next } => {
                redirect_found(&format!("{}?next={next}", paths::LOGIN))
            }

            ApiError::BadRequest { message } => (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "bad_request", "message": message})),
            )
                .into_response(),

            ApiError::DatabaseError { operation } => {
                error!(operation = %operation, "Database operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "internal", "message": "Internal server error"})),
                )
                    .into_response()
            }

            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "internal", "message": "Internal server error"})),
            )
                .into_response(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_required_preserves_path_and_query() {
        let uri: Uri = "/notes/my-note/edit?draft=1".parse().unwrap();
        match ApiError::login_required(&uri) {
            ApiError::LoginRequired { next } => assert_eq!(next, "/notes/my-note/edit?draft=1"),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err: ApiError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, ApiError::NotFound));
    }
}
