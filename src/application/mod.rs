//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TtsEngine、RateLimiter）
//! - commands: 语音合成命令及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;

// Re-exports
pub use commands::{
    handlers::{audio_filename, SynthesizeSpeechHandler, AUDIO_CONTENT_TYPE},
    SynthesizeSpeech, SynthesizeSpeechResponse,
};

pub use error::ApplicationError;

pub use ports::{
    // Rate limiter
    RateLimitDecision,
    RateLimiterPort,
    // TTS engine
    InferRequest,
    InferResponse,
    TtsEnginePort,
    TtsError,
};
