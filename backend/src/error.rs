//! Application error handling
//!
//! Every handler error is converted at the boundary into the uniform
//! `{success: false, message}` body. Internal, database and media-host
//! failures are logged with detail; clients only see a generic message.

use crate::media::MediaError;
use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use todo_list_shared::ErrorResponse;
use tracing::{debug, error};

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Invalid token")]
    InvalidToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username already registered")]
    UsernameTaken,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BadRequest(String),

    /// Absent and not-owned resources are reported identically
    #[error("{0}")]
    NotFound(String),

    #[error("Upload failed")]
    Upstream(#[from] MediaError),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated
            | ApiError::InvalidToken
            | ApiError::UserNotFound
            | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::UsernameTaken
            | ApiError::PasswordMismatch
            | ApiError::Validation(_)
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) | ApiError::Internal(_) | ApiError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Upstream(err) => error!("Media host error: {:?}", err),
            ApiError::Internal(err) => error!("Internal error: {:?}", err),
            ApiError::Database(err) => error!("Database error: {:?}", err),
            other => debug!(status = %other.status(), "Request rejected: {}", other),
        }

        let body = Json(ErrorResponse::new(self.to_string()));
        (self.status(), body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// JSON body extractor whose rejection uses the API error envelope
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_auth_errors_are_unauthorized() {
        for error in [
            ApiError::Unauthenticated,
            ApiError::InvalidToken,
            ApiError::UserNotFound,
            ApiError::InvalidCredentials,
        ] {
            assert_eq!(error.into_response().status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_registration_errors_are_bad_request() {
        assert_eq!(
            ApiError::UsernameTaken.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::PasswordMismatch.into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_not_found_error_status() {
        let error = ApiError::NotFound("Todo not found or not authorized".to_string());
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_error_body_envelope() {
        let response = ApiError::Unauthenticated.into_response();
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Not authenticated");
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let error = ApiError::Internal(anyhow::anyhow!("connection string postgres://secret"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Internal server error");
    }

    #[tokio::test]
    async fn test_upstream_error_hides_detail() {
        let error = ApiError::Upstream(MediaError::Rejected {
            status: 401,
            message: "Invalid api_key abc123".to_string(),
        });
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Upload failed");
    }
}
