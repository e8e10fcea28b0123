use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use callscope_common::error::CallscopeError;

pub struct ApiError(pub CallscopeError);

impl From<CallscopeError> for ApiError {
    fn from(err: CallscopeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            CallscopeError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            CallscopeError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };

        let body = serde_json::json!({ "error": message });
        (status, Json(body)).into_response()
    }
}
