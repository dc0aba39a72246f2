use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use calbridge_core::calendar::CalendarError;

use crate::{business::BusinessLayerError, config::Config};

/// Failed API request.
///
/// Renders `{}` unless debug output is enabled, in which case the body is
/// `{"message": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    expose: bool,
}

impl ApiError {
    pub fn new(error: BusinessLayerError, config: &Config) -> Self {
        let code = error.status_code(config.not_found_as_404);

        Self {
            status: StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST),
            message: error.to_string(),
            expose: config.debug,
        }
    }

    /// Request body that is not valid UTF-8.
    pub fn invalid_body(config: &Config) -> Self {
        Self::new(
            CalendarError::Parse("Request body is not valid UTF-8".to_string()).into(),
            config,
        )
    }

    fn body(&self) -> Value {
        if self.expose {
            json!({ "message": self.message })
        } else {
            json!({})
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(status = %self.status, error = %self.message, "Request failed");

        (self.status, Json(self.body())).into_response()
    }
}
