use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cliptube_core::request::InvalidRequest;

/// The one message callers see for any fetch/trim/verification failure.
/// Tool stderr and scratch paths stay in the server logs.
const GENERIC_PROCESSING_ERROR: &str = "Failed to process video clip";

#[derive(Debug)]
pub enum ApiError {
    /// Client-side input problem; carries the specific validation message.
    BadRequest(String),
    /// Anything that went wrong after validation.
    Processing,
}

impl From<InvalidRequest> for ApiError {
    fn from(e: InvalidRequest) -> ApiError {
        ApiError::BadRequest(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Processing => (
                StatusCode::INTERNAL_SERVER_ERROR,
                GENERIC_PROCESSING_ERROR.to_string(),
            ),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
