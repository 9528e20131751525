//! # Error Handling
//!
//! Application error type and its conversion into HTTP responses.
//!
//! Client errors (bad form bodies, CSRF failures, unknown resources) are answered with the
//! matching 4xx status. Everything else is an internal failure: it is logged server-side with a
//! backtrace and the client only ever sees a generic `500 Internal Server Error`.

use std::backtrace::Backtrace;

use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::models::ModelError;

/// Application-wide error type
///
/// Handlers and middleware return `AppResult<T>` and rely on `?` to convert session, data-layer
/// and form-decoding failures into this enum.
#[derive(Error, Debug)]
pub enum AppError {
    /// The session store could not load or persist the session
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Unexpected data-layer failure
    ///
    /// Expected outcomes such as `NoRecord` or `DuplicateEmail` are matched by the handlers
    /// before they reach this variant.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// The submitted form body could not be decoded
    #[error("Malformed form: {0}")]
    Form(#[from] FormRejection),

    /// Resource not found (404)
    #[error("Not found")]
    NotFound,

    /// Bad request (400), e.g. a missing or mismatched CSRF token
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(reason) => {
                tracing::debug!(%reason, "rejecting bad request");
                StatusCode::BAD_REQUEST
            }
            AppError::Form(rejection) => {
                tracing::debug!(%rejection, "rejecting malformed form");
                StatusCode::BAD_REQUEST
            }
            AppError::Session(_) | AppError::Model(_) => {
                // Full detail stays server-side.
                tracing::error!(
                    error = %self,
                    backtrace = %Backtrace::force_capture(),
                    "internal server error"
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, status.canonical_reason().unwrap_or_default()).into_response()
    }
}

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        String::from_utf8(bytes.to_vec()).expect("utf8")
    }

    #[tokio::test]
    async fn internal_errors_do_not_leak_detail() {
        let err = AppError::Model(ModelError::Database(sqlx::Error::PoolTimedOut));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Internal Server Error");
    }

    #[tokio::test]
    async fn client_errors_use_reason_phrase() {
        let response = AppError::BadRequest("csrf".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Bad Request");

        let response = AppError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "Not Found");
    }
}
