//! tts-relay - 文本转语音 HTTP 中继
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Synthesis Context: 请求校验、引擎选择
//!
//! 应用层 (application/):
//! - Ports: 端口定义（TtsEngine, RateLimiter）
//! - Commands: 语音合成命令处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API、限流中间件
//! - Memory: 固定窗口限流器
//! - Adapters: Google / VOICEVOX TTS Client

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::{load_config, AppConfig};
