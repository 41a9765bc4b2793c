//! Server error types with HTTP status code mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::export::SerializeError;
use crate::render::RenderError;
use crate::store::StoreError;

/// Error returned by every handler.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("Could not render page: {0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    Export(#[from] SerializeError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),
}

impl ServerError {
    /// Map error to HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 404
            ServerError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ServerError::Store(StoreError::InvalidId(_)) => StatusCode::NOT_FOUND,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,

            // 422
            ServerError::Store(StoreError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,

            // 400
            ServerError::Store(StoreError::Payload(_)) => StatusCode::BAD_REQUEST,
            ServerError::Store(StoreError::Query(_)) => StatusCode::BAD_REQUEST,
            ServerError::Export(SerializeError::UnknownFormat(_)) => StatusCode::BAD_REQUEST,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,

            // 500
            ServerError::Store(StoreError::Seed { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Store(StoreError::Poisoned) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        ServerError::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ServerError::NotFound(msg.into())
    }

    /// Logs the error at a level matching its status.
    pub(crate) fn log(&self) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "request rejected");
        }
    }
}

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: u16,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
            status: status.as_u16(),
        };

        let json = serde_json::to_string(&body).unwrap_or_else(|_| {
            format!(r#"{{"error":"internal error","status":{}}}"#, status.as_u16())
        });

        (status, [("content-type", "application/json")], json).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
