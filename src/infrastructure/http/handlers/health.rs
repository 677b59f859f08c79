//! Health Handler

use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// 健康检查响应
#[derive(Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    /// ISO 8601 时间
    pub time: String,
}

/// Health endpoint - 健康检查
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
