//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod rate_limiter;
mod tts_engine;

pub use rate_limiter::{RateLimitDecision, RateLimiterPort};
pub use tts_engine::{InferRequest, InferResponse, TtsEnginePort, TtsError};
