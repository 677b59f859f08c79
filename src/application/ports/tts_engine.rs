//! TTS Engine Port - TTS 引擎抽象
//!
//! 定义语音合成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Engine, SpeakerId};

/// TTS 错误
///
/// 上游返回非 2xx 时保留其状态码，HTTP 层据此决定返回给调用方的状态
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TtsError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Upstream returned HTTP {status}: {message}")]
    ServiceError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// VOICEVOX 第一步响应中没有音频地址
    #[error("mp3StreamingUrl missing from synthesis response{}", upstream_hint(.0))]
    MissingAudioUrl(Option<String>),
}

fn upstream_hint(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}

impl TtsError {
    /// 上游 HTTP 状态码（如果有）
    pub fn status(&self) -> Option<u16> {
        match self {
            TtsError::ServiceError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// TTS 合成请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferRequest {
    /// 要合成的文本内容
    pub text: String,
    /// 语言代码（Google 使用）
    pub language: String,
    /// 说话人（VOICEVOX 使用）
    pub speaker: SpeakerId,
}

/// TTS 合成响应
#[derive(Debug, Clone)]
pub struct InferResponse {
    /// 音频数据（MPEG）
    pub audio_data: Vec<u8>,
    /// 上游声明的 Content-Type
    pub content_type: Option<String>,
}

/// TTS Engine Port
///
/// 外部 TTS 服务的抽象接口
#[async_trait]
pub trait TtsEnginePort: Send + Sync {
    /// 引擎标识
    fn engine(&self) -> Engine;

    /// 执行合成，返回完整音频
    async fn infer(&self, request: InferRequest) -> Result<InferResponse, TtsError>;
}
