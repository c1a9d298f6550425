use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cgshare_core::error::CoreError;
use serde_json::json;

/// Error string for request bodies that are not valid JSON of the right shape.
pub const DECODE_REQUEST_BODY: &str = "decode-request-body";

/// Error string accompanying a list of missing or malformed request fields.
pub const INVALID_FIELDS: &str = "invalid-fields";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `cgshare_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request body could not be decoded.
    #[error("Undecodable request body: {0}")]
    DecodeRequestBody(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::DecodeRequestBody(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND", core.to_string()),
                CoreError::Validation(e) => (StatusCode::FORBIDDEN, "VALIDATION_FAILED", e.to_string()),
                CoreError::InvalidFields(fields) => {
                    let body = json!({
                        "error": INVALID_FIELDS,
                        "code": "INVALID_FIELDS",
                        "fields": fields,
                    });
                    return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
                }
                CoreError::UnknownEntryType(_) => {
                    (StatusCode::BAD_REQUEST, "BAD_REQUEST", core.to_string())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::MalformedPayload(_) | CoreError::Storage(_) | CoreError::Hashing(_) => {
                    tracing::error!(error = %core, "Internal core error");
                    internal()
                }
            },

            // --- HTTP-specific errors ---
            AppError::DecodeRequestBody(detail) => {
                tracing::debug!(detail = %detail, "Rejected request body");
                (
                    StatusCode::BAD_REQUEST,
                    "DECODE_REQUEST_BODY",
                    DECODE_REQUEST_BODY.to_string(),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
