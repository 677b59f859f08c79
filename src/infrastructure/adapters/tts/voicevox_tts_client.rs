//! VOICEVOX TTS Client - 两步取音频的引擎
//!
//! 实现 TtsEnginePort trait，日语专用
//!
//! 外部 API:
//! 1. GET https://api.tts.quest/v3/voicevox/synthesis?text=...&speaker=3
//!    Response: {"success": true, "mp3StreamingUrl": "https://..."}  (JSON)
//! 2. GET {mp3StreamingUrl}
//!    Response: audio/mpeg binary
//!
//! 第二步依赖第一步的结果，只能串行执行。

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::response::{ensure_success, read_audio, send_error};
use crate::application::ports::{InferRequest, InferResponse, TtsEnginePort, TtsError};
use crate::domain::Engine;

/// 合成接口响应体 (JSON)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesisResponse {
    /// 音频流地址
    mp3_streaming_url: Option<String>,
    /// 失败时上游给出的说明
    error_message: Option<String>,
}

/// VOICEVOX TTS 客户端配置
#[derive(Debug, Clone)]
pub struct VoicevoxTtsClientConfig {
    /// 合成接口 URL
    pub url: String,
    /// API Key（可选，未设置时使用免费额度）
    pub api_key: Option<String>,
    /// 单次请求超时时间（秒），两步请求各自计时
    pub timeout_secs: u64,
}

impl Default for VoicevoxTtsClientConfig {
    fn default() -> Self {
        Self {
            url: "https://api.tts.quest/v3/voicevox/synthesis".to_string(),
            api_key: None,
            timeout_secs: 25,
        }
    }
}

impl VoicevoxTtsClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

/// VOICEVOX TTS 客户端
pub struct VoicevoxTtsClient {
    client: Client,
    config: VoicevoxTtsClientConfig,
}

impl VoicevoxTtsClient {
    /// 创建新的 VOICEVOX TTS 客户端
    pub fn new(config: VoicevoxTtsClientConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 第一步：请求合成，取得音频地址
    async fn request_audio_url(&self, request: &InferRequest) -> Result<String, TtsError> {
        let speaker = request.speaker.to_string();
        let mut query = vec![("text", request.text.as_str()), ("speaker", speaker.as_str())];
        if let Some(key) = &self.config.api_key {
            query.push(("key", key.as_str()));
        }

        let response = self
            .client
            .get(&self.config.url)
            .query(&query)
            .send()
            .await
            .map_err(send_error)?;

        let body: SynthesisResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TtsError::Timeout
                } else {
                    TtsError::InvalidResponse(format!("Failed to parse synthesis response: {}", e))
                }
            })?;

        body.mp3_streaming_url
            .filter(|url| !url.trim().is_empty())
            .ok_or(TtsError::MissingAudioUrl(body.error_message))
    }
}

#[async_trait]
impl TtsEnginePort for VoicevoxTtsClient {
    fn engine(&self) -> Engine {
        Engine::Voicevox
    }

    async fn infer(&self, request: InferRequest) -> Result<InferResponse, TtsError> {
        tracing::debug!(
            url = %self.config.url,
            speaker = %request.speaker,
            text_len = request.text.len(),
            "Sending VOICEVOX synthesis request"
        );

        let audio_url = self.request_audio_url(&request).await?;

        tracing::debug!(audio_url = %audio_url, "Fetching VOICEVOX audio");

        let response = self
            .client
            .get(&audio_url)
            .send()
            .await
            .map_err(send_error)?;

        let response = read_audio(ensure_success(response).await?).await?;

        tracing::info!(
            engine = "voicevox",
            speaker = %request.speaker,
            audio_size = response.audio_data.len(),
            "VOICEVOX TTS completed"
        );

        Ok(response)
    }
}
