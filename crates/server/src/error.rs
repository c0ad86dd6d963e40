//! Application error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::store::StoreError;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("data access failure")]
    DataAccess(#[from] StoreError),

    #[error("not found")]
    NotFound,

    #[error("template rendering failed")]
    Render(#[from] tera::Error),

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::DataAccess(_) | AppError::Render(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Log server-side failures. Details stay in the log, never the response.
    fn report(&self) {
        match self {
            AppError::DataAccess(e) => tracing::error!(error = %e, "data access failure"),
            AppError::Render(e) => tracing::error!(error = ?e, "failed to render template"),
            AppError::Internal(e) => tracing::error!(error = %e, "internal server error"),
            AppError::NotFound => {}
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.report();
        let status = self.status();
        let body = match &self {
            AppError::NotFound => "not found",
            _ => "internal server error",
        };

        (status, body).into_response()
    }
}

/// Error wrapper for JSON routes: same taxonomy, JSON body.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        Self(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self(AppError::DataAccess(e))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.0.report();
        let message = match &self.0 {
            AppError::NotFound => "Drug not found",
            _ => "Internal server error",
        };

        (
            self.0.status(),
            Json(serde_json::json!({ "error": message })),
        )
            .into_response()
    }
}

/// Result type alias using AppError.
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for JSON routes.
pub type ApiResult<T> = Result<T, ApiError>;
