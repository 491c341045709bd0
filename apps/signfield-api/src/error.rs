//! Error types for the signfield API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use signfield_core::AssembleError;
use thiserror::Error;

/// Server error types.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("rendering credential is not configured")]
    MissingCredential,

    #[error("rendering failed: {detail}")]
    Rendering {
        /// Upstream HTTP status, absent when the gateway was unreachable.
        status: Option<u16>,
        detail: String,
    },

    #[error(transparent)]
    Assembly(#[from] AssembleError),
}

/// Error response body.
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ServerError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg.clone())
            }
            ServerError::MissingCredential => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "RENDER_ERROR",
                "rendering credential is not configured (PDF_API_KEY)".to_string(),
            ),
            ServerError::Rendering { status, detail } => {
                let message = match status {
                    Some(code) => format!("rendering service returned status {code}: {detail}"),
                    None => format!("rendering service unreachable: {detail}"),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, "RENDER_ERROR", message)
            }
            ServerError::Assembly(err) => {
                let (status, code) = match err {
                    AssembleError::InvalidRect { .. } => {
                        (StatusCode::BAD_REQUEST, "INVALID_REQUEST")
                    }
                    AssembleError::Parse { .. } => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "PARSE_ERROR")
                    }
                    AssembleError::Page { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "PAGE_ERROR"),
                    AssembleError::Serialize { .. } => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "SERIALIZE_ERROR")
                    }
                };
                (status, code, err.to_string())
            }
        };

        if status.is_server_error() {
            tracing::error!(code, "{}", message);
        }

        let body = ErrorResponse {
            success: false,
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
