//! Failure taxonomy and its mapping to caller-visible responses.
//!
//! Every fallible operation in the service returns [`ServiceError`], so the
//! route layer handles failures uniformly: validation and bad boundary input
//! become 400, a missing promotion becomes 404, and storage failures become
//! 500 with the details kept server-side.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::promotion::ValidationError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Malformed input at the request boundary, e.g. an unparseable query
    /// filter or a body id that contradicts the path.
    #[error("{0}")]
    UnsupportedInput(String),
    /// The request body never reached validation: wrong media type or
    /// undecodable JSON. Keeps the extractor's status code.
    #[error("{message}")]
    InvalidBody { status: u16, message: String },
    #[error("Promotion with id '{0}' was not found.")]
    NotFound(i32),
    /// Underlying store rejected the operation. The transaction has already
    /// been rolled back when this surfaces.
    #[error("database error: {0}")]
    Storage(#[from] sea_orm::DbErr),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) | ServiceError::UnsupportedInput(_) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::InvalidBody { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST)
            }
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::InvalidBody {
            status: rejection.status().as_u16(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Storage details stay in the server log; clients get a generic message.
        let message = match &self {
            ServiceError::Storage(err) => {
                tracing::error!("Storage error: {err}");
                "An unexpected error occurred.".to_string()
            }
            other => {
                tracing::warn!("{}: {other}", status.as_u16());
                other.to_string()
            }
        };
        let title = match status {
            StatusCode::BAD_REQUEST => "Bad Request",
            StatusCode::NOT_FOUND => "Not Found",
            StatusCode::UNSUPPORTED_MEDIA_TYPE => "Unsupported Media Type",
            StatusCode::UNPROCESSABLE_ENTITY => "Unprocessable Entity",
            _ => "Internal Server Error",
        };
        let body = Json(json!({
            "status": status.as_u16(),
            "error": title,
            "message": message,
        }));
        (status, body).into_response()
    }
}
