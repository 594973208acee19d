//! HTTP mapping for `OdometerError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use odometer_core::error::OdometerError;

/// Handler error: an `OdometerError` rendered as a JSON error body.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub OdometerError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            OdometerError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            OdometerError::UpstreamUnavailable(_)
            | OdometerError::UpstreamStatus(_)
            | OdometerError::MalformedPayload(_) => StatusCode::BAD_GATEWAY,
            OdometerError::BadConfig(_)
            | OdometerError::UnsupportedVersion
            | OdometerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.0.client_code().as_str(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}
