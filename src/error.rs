//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Path parameter is not a syntactically valid document id. Rejected
    /// before any storage call.
    #[error("ID invalido")]
    InvalidId,
    /// Zero documents matched an update/delete. Distinct from [`AppError::InvalidId`]:
    /// a well-formed id that matches nothing is 404, never 400.
    #[error("{0} no encontrado")]
    NotFound(String),
    #[error("base de datos no disponible: {0}")]
    Unavailable(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("config: {0}")]
    Config(String),
}

/// Failure envelope for everything except not-found: `{"success": false, "error": ...}`.
#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

/// Not-found keeps the reference wire shape: `{"success": false, "message": ...}`.
#[derive(Serialize)]
struct NotFoundBody {
    success: bool,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidId | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unavailable(_) | AppError::Db(_) | AppError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "request rejected");
        }
        match self {
            AppError::NotFound(_) => {
                let body = NotFoundBody {
                    success: false,
                    message: self.to_string(),
                };
                (status, Json(body)).into_response()
            }
            other => {
                let body = ErrorBody {
                    success: false,
                    error: other.to_string(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}
