//! Google TTS Client - 直接返回音频的引擎
//!
//! 实现 TtsEnginePort trait，单次请求即可拿到音频
//!
//! 外部 API:
//! GET https://translate.google.com/translate_tts?ie=UTF-8&tl=en&client=tw-ob&q=...
//! Response: audio/mpeg binary

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::response::{ensure_success, read_audio, send_error};
use crate::application::ports::{InferRequest, InferResponse, TtsEnginePort, TtsError};
use crate::domain::Engine;

/// translate_tts 不接受没有浏览器 UA 的请求
const USER_AGENT: &str = "Mozilla/5.0 (compatible; tts-relay)";

/// Google TTS 客户端配置
#[derive(Debug, Clone)]
pub struct GoogleTtsClientConfig {
    /// 合成接口 URL
    pub url: String,
    /// `client` 查询参数
    pub client_id: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for GoogleTtsClientConfig {
    fn default() -> Self {
        Self {
            url: "https://translate.google.com/translate_tts".to_string(),
            client_id: "tw-ob".to_string(),
            timeout_secs: 25,
        }
    }
}

impl GoogleTtsClientConfig {
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
}

/// Google TTS 客户端
pub struct GoogleTtsClient {
    client: Client,
    config: GoogleTtsClientConfig,
}

impl GoogleTtsClient {
    /// 创建新的 Google TTS 客户端
    pub fn new(config: GoogleTtsClientConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl TtsEnginePort for GoogleTtsClient {
    fn engine(&self) -> Engine {
        Engine::Google
    }

    async fn infer(&self, request: InferRequest) -> Result<InferResponse, TtsError> {
        tracing::debug!(
            url = %self.config.url,
            language = %request.language,
            text_len = request.text.len(),
            "Sending Google TTS request"
        );

        let response = self
            .client
            .get(&self.config.url)
            .query(&[
                ("ie", "UTF-8"),
                ("tl", request.language.as_str()),
                ("client", self.config.client_id.as_str()),
                ("q", request.text.as_str()),
            ])
            .send()
            .await
            .map_err(send_error)?;

        let response = read_audio(ensure_success(response).await?).await?;

        tracing::info!(
            engine = "google",
            audio_size = response.audio_data.len(),
            "Google TTS completed"
        );

        Ok(response)
    }
}
