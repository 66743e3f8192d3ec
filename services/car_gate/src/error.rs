//! Reply envelope and API error type. Handler replies, JSON rejections and
//! unknown routes are JSON carrying a numeric `status` equal to the HTTP
//! status. Responses produced by the router or tower-http layers themselves
//! (405, 408, and 413 on an oversized `content-length`) are not enveloped.
//!
//! ```json
//! { "status": 400, "code": "invalid_identifier", "error": "invalid identifier at files[1]: ..." }
//! ```

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use car_cid::{FileDescriptor, NormalizeError};
use car_store::StoreError;
use car_upload::UploadError;
use serde::Serialize;
use tracing::{error, warn};

pub const CAR_EXISTS_MESSAGE: &str = "CAR File already exists";
pub const CAR_MISSING_MESSAGE: &str = "File not found, try to generate car before.";

#[derive(Debug, Default, Serialize)]
pub struct ApiReply {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FileDescriptor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiReply {
    pub fn ok() -> Self {
        Self { status: StatusCode::OK.as_u16(), ..Default::default() }
    }
}

impl IntoResponse for ApiReply {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl AppError {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self { status, code, message: message.into() }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_request", msg)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", msg)
    }

    pub fn unsupported_media_type() -> Self {
        Self::new(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "unsupported_media_type",
            "content-type must be application/json",
        )
    }

    pub fn bad_gateway(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, "upstream_error", msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg)
    }
}

impl From<NormalizeError> for AppError {
    fn from(e: NormalizeError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_identifier", e.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        match e.status() {
            StatusCode::PAYLOAD_TOO_LARGE => {
                Self::new(StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large", e.body_text())
            }
            s if s.is_server_error() => Self::internal(e.body_text()),
            // Missing content-type, malformed and mistyped bodies alike.
            _ => Self::bad_request(e.body_text()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            // Body codes kept as the main application already expects them.
            StoreError::AlreadyExists(_) => Self::new(StatusCode::NOT_FOUND, "car_exists", CAR_EXISTS_MESSAGE),
            StoreError::CarMissing(_) => Self::new(StatusCode::NOT_FOUND, "car_missing", CAR_MISSING_MESSAGE),
            StoreError::InputMissing(_) => Self::not_found(e.to_string()),
            StoreError::Spawn { .. } | StoreError::PackFailed { .. } | StoreError::Io { .. } => {
                Self::internal(e.to_string())
            }
        }
    }
}

impl From<UploadError> for AppError {
    fn from(e: UploadError) -> Self {
        Self::bad_gateway(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = self.status.as_u16(), code = self.code, "{}", self.message);
        } else {
            warn!(status = self.status.as_u16(), code = self.code, "{}", self.message);
        }
        ApiReply {
            status: self.status.as_u16(),
            code: Some(self.code),
            error: Some(self.message),
            ..Default::default()
        }
        .into_response()
    }
}
