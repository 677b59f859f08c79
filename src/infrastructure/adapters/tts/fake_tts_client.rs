//! Fake TTS Client - 用于测试的 TTS 客户端
//!
//! 不访问网络，返回预设的音频或错误，并记录每次收到的请求

use async_trait::async_trait;
use std::sync::Mutex;

use crate::application::ports::{InferRequest, InferResponse, TtsEnginePort, TtsError};
use crate::domain::Engine;

/// Fake TTS Client
pub struct FakeTtsClient {
    engine: Engine,
    outcome: Result<Vec<u8>, TtsError>,
    calls: Mutex<Vec<InferRequest>>,
}

impl FakeTtsClient {
    /// 始终返回固定音频
    pub fn returning(engine: Engine, audio_data: impl Into<Vec<u8>>) -> Self {
        Self {
            engine,
            outcome: Ok(audio_data.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// 始终返回指定错误
    pub fn failing(engine: Engine, error: TtsError) -> Self {
        Self {
            engine,
            outcome: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// 已收到的请求
    pub fn calls(&self) -> Vec<InferRequest> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

#[async_trait]
impl TtsEnginePort for FakeTtsClient {
    fn engine(&self) -> Engine {
        self.engine
    }

    async fn infer(&self, request: InferRequest) -> Result<InferResponse, TtsError> {
        tracing::debug!(
            engine = %self.engine,
            text_len = request.text.len(),
            "FakeTtsClient: returning fixed outcome"
        );

        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request);

        self.outcome.clone().map(|audio_data| InferResponse {
            audio_data,
            content_type: Some("audio/mpeg".to_string()),
        })
    }
}
