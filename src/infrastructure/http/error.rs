//! HTTP Error Handling
//!
//! 所有失败在这里统一转换为 `{ error, detail? }` JSON 响应

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;
use crate::domain::SynthesisError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            error: error.into(),
            detail,
        }
    }
}

/// 错误消息
pub mod message {
    pub const MISSING_TEXT: &str = "Missing 'text'";
    pub const INVALID_JSON: &str = "Invalid JSON body";
    pub const UNSUPPORTED_ENGINE: &str = "Unsupported engine";
    pub const TTS_FAILED: &str = "TTS failed";
    pub const TOO_MANY_REQUESTS: &str = "Too many requests, please try again later.";
    pub const NOT_FOUND: &str = "Not found";
    pub const INTERNAL_ERROR: &str = "Internal server error";
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    BadRequest {
        error: &'static str,
        detail: Option<String>,
    },
    /// 请求体提取失败（如超出大小限制），沿用提取器给出的状态码
    Rejected { status: StatusCode, detail: String },
    TooManyRequests,
    NotFound,
    /// 上游 TTS 失败；有上游状态码时原样返回
    Upstream { status: Option<u16>, detail: String },
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Rejected { status, .. } => *status,
            ApiError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Upstream { status, .. } => status
                .and_then(|s| StatusCode::from_u16(s).ok())
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let response = match self {
            ApiError::BadRequest { error, detail } => {
                tracing::warn!(status = status.as_u16(), error = %error, detail = ?detail, "Bad request");
                ErrorResponse::new(error, detail)
            }
            ApiError::Rejected { detail, .. } => {
                tracing::warn!(status = status.as_u16(), detail = %detail, "Request body rejected");
                ErrorResponse::new(status.canonical_reason().unwrap_or("Bad request"), Some(detail))
            }
            ApiError::TooManyRequests => ErrorResponse::new(message::TOO_MANY_REQUESTS, None),
            ApiError::NotFound => ErrorResponse::new(message::NOT_FOUND, None),
            ApiError::Upstream { detail, .. } => {
                tracing::error!(status = status.as_u16(), detail = %detail, "TTS upstream failed");
                ErrorResponse::new(message::TTS_FAILED, Some(detail))
            }
            ApiError::Internal(msg) => {
                tracing::error!(status = status.as_u16(), error = %msg, "Internal server error");
                ErrorResponse::new(message::INTERNAL_ERROR, None)
            }
        };

        (status, Json(response)).into_response()
    }
}

impl From<SynthesisError> for ApiError {
    fn from(e: SynthesisError) -> Self {
        match e {
            SynthesisError::MissingText => ApiError::BadRequest {
                error: message::MISSING_TEXT,
                detail: None,
            },
            SynthesisError::InvalidJson(msg) => ApiError::BadRequest {
                error: message::INVALID_JSON,
                detail: Some(msg),
            },
            SynthesisError::UnsupportedEngine(engine) => ApiError::BadRequest {
                error: message::UNSUPPORTED_ENGINE,
                detail: Some(format!(
                    "Unsupported engine '{}', expected 'google' or 'voicevox'",
                    engine
                )),
            },
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::InvalidRequest(e) => e.into(),
            ApplicationError::Upstream(e) => ApiError::Upstream {
                status: e.status(),
                detail: e.to_string(),
            },
            ApplicationError::InternalError(msg) => ApiError::Internal(msg),
        }
    }
}
