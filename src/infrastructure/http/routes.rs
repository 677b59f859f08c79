//! HTTP Routes
//!
//! API Endpoints:
//! - /health         GET   健康检查
//! - /tts            POST  合成语音（按 engine 或语言选择引擎）
//! - /tts/google     POST  合成语音（固定 Google）
//! - /tts/voicevox   POST  合成语音（固定 VOICEVOX）

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health))
        .merge(tts_routes())
        .fallback(handlers::not_found)
}

/// TTS 路由
fn tts_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tts", post(handlers::synthesize))
        .route("/tts/google", post(handlers::synthesize_google))
        .route("/tts/voicevox", post(handlers::synthesize_voicevox))
}
