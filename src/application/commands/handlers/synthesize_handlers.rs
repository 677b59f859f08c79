//! Synthesize Command Handlers
//!
//! 调度流程：引擎选择 → 调用对应适配器 → 组装音频响应

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::application::commands::{SynthesizeSpeech, SynthesizeSpeechResponse};
use crate::application::error::ApplicationError;
use crate::application::ports::{InferRequest, TtsEnginePort};
use crate::domain::{select_engine, Engine, SpeakerId};

/// 输出音频的 Content-Type
pub const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

/// 根据时间戳生成音频文件名
pub fn audio_filename(at: DateTime<Utc>) -> String {
    format!("tts_{}.mp3", at.timestamp_millis())
}

/// SynthesizeSpeech Handler
pub struct SynthesizeSpeechHandler {
    google: Arc<dyn TtsEnginePort>,
    voicevox: Arc<dyn TtsEnginePort>,
}

impl SynthesizeSpeechHandler {
    pub fn new(google: Arc<dyn TtsEnginePort>, voicevox: Arc<dyn TtsEnginePort>) -> Self {
        Self { google, voicevox }
    }

    fn engine_port(&self, engine: Engine) -> &Arc<dyn TtsEnginePort> {
        match engine {
            Engine::Google => &self.google,
            Engine::Voicevox => &self.voicevox,
        }
    }

    pub async fn handle(
        &self,
        command: SynthesizeSpeech,
    ) -> Result<SynthesizeSpeechResponse, ApplicationError> {
        let SynthesizeSpeech { request, engine } = command;

        // 不支持的引擎在任何网络请求之前拒绝
        let engine = match engine {
            Some(engine) => engine,
            None => select_engine(request.engine.as_deref(), &request.language)?,
        };

        let infer_request = InferRequest {
            text: request.text,
            language: request.language,
            speaker: SpeakerId::resolve(request.speaker),
        };

        tracing::debug!(
            engine = %engine,
            language = %infer_request.language,
            speaker = %infer_request.speaker,
            text_len = infer_request.text.len(),
            "Dispatching synthesis"
        );

        let response = self.engine_port(engine).infer(infer_request).await?;

        tracing::info!(
            engine = %engine,
            audio_size = response.audio_data.len(),
            upstream_content_type = ?response.content_type,
            "Synthesis completed"
        );

        Ok(SynthesizeSpeechResponse {
            engine,
            audio_data: response.audio_data,
            content_type: AUDIO_CONTENT_TYPE,
            filename: audio_filename(Utc::now()),
        })
    }
}
