//! 上游响应处理
//!
//! 两个引擎共用的状态检查与音频读取

use reqwest::Response;

use crate::application::ports::{InferResponse, TtsError};

/// 错误响应体最多保留的字符数
const MAX_ERROR_BODY_CHARS: usize = 200;

/// 发送阶段的 reqwest 错误
pub(super) fn send_error(e: reqwest::Error) -> TtsError {
    if e.is_timeout() {
        TtsError::Timeout
    } else if e.is_connect() {
        TtsError::NetworkError(format!("Cannot connect to TTS service: {}", e))
    } else {
        TtsError::NetworkError(e.to_string())
    }
}

/// 非 2xx 响应转换为 `TtsError::ServiceError`，保留上游状态码
pub(super) async fn ensure_success(response: Response) -> Result<Response, TtsError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message: String = body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect();

    Err(TtsError::ServiceError {
        status: status.as_u16(),
        message: if message.is_empty() {
            status.canonical_reason().unwrap_or("Unknown").to_string()
        } else {
            message
        },
    })
}

/// 读取完整音频字节
pub(super) async fn read_audio(response: Response) -> Result<InferResponse, TtsError> {
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let audio_data = response
        .bytes()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                TtsError::Timeout
            } else {
                TtsError::InvalidResponse(format!("Failed to read audio: {}", e))
            }
        })?
        .to_vec();

    Ok(InferResponse {
        audio_data,
        content_type,
    })
}
