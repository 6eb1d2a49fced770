//! The JSON envelope wrapping every API response.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// `{ "data": …, "message": …, "status": …, "success": … }`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    pub message: String,
    pub status: u16,
    pub success: bool,
}

impl<T: Serialize> Envelope<T> {
    /// A successful response carrying `data`.
    pub fn success(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            data: Some(data),
            message: message.into(),
            status: status.as_u16(),
            success: true,
        }
    }
}

impl Envelope<()> {
    /// A successful response with `data: null`.
    pub fn empty(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            data: None,
            message: message.into(),
            status: status.as_u16(),
            success: true,
        }
    }

    /// An error response.
    pub fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            data: None,
            message: message.into(),
            status: status.as_u16(),
            success: false,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
