//! Application State
//!
//! HTTP 层共享状态：合成调度器 + 限流器

use std::sync::Arc;

use crate::application::{RateLimiterPort, SynthesizeSpeechHandler, TtsEnginePort};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    /// 为 None 时不限流
    pub rate_limiter: Option<Arc<dyn RateLimiterPort>>,
    /// 是否信任 X-Forwarded-For 作为客户端标识
    pub trust_forwarded_for: bool,

    // ========== Command Handlers ==========
    pub synthesize_handler: SynthesizeSpeechHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        google: Arc<dyn TtsEnginePort>,
        voicevox: Arc<dyn TtsEnginePort>,
        rate_limiter: Option<Arc<dyn RateLimiterPort>>,
    ) -> Self {
        Self {
            rate_limiter,
            trust_forwarded_for: false,
            synthesize_handler: SynthesizeSpeechHandler::new(google, voicevox),
        }
    }

    pub fn with_trust_forwarded_for(mut self, trust: bool) -> Self {
        self.trust_forwarded_for = trust;
        self
    }
}
