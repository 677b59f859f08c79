//! Synthesize Commands - 语音合成命令

use crate::domain::{Engine, SynthesisRequest};

/// 语音合成命令
#[derive(Debug, Clone)]
pub struct SynthesizeSpeech {
    pub request: SynthesisRequest,
    /// 固定引擎（单引擎端点），为 None 时由引擎选择器决定
    pub engine: Option<Engine>,
}

impl SynthesizeSpeech {
    /// 由请求字段和语言自动选择引擎
    pub fn auto(request: SynthesisRequest) -> Self {
        Self {
            request,
            engine: None,
        }
    }

    /// 固定使用指定引擎，忽略请求中的 engine 字段
    pub fn fixed(request: SynthesisRequest, engine: Engine) -> Self {
        Self {
            request,
            engine: Some(engine),
        }
    }
}

/// 语音合成响应
#[derive(Debug, Clone)]
pub struct SynthesizeSpeechResponse {
    pub engine: Engine,
    pub audio_data: Vec<u8>,
    pub content_type: &'static str,
    /// 建议的文件名（tts_<epoch-ms>.mp3）
    pub filename: String,
}
