//! tts-relay - 文本转语音 HTTP 中继
//!
//! 接收文本，转发到 Google Translate TTS 或 VOICEVOX，返回 MP3 音频

use std::sync::Arc;
use std::time::Duration;

use tts_relay::application::{RateLimiterPort, TtsEnginePort};
use tts_relay::config::{load_config, print_config, AppConfig};
use tts_relay::infrastructure::adapters::{
    GoogleTtsClient, GoogleTtsClientConfig, VoicevoxTtsClient, VoicevoxTtsClientConfig,
};
use tts_relay::infrastructure::http::{AppState, HttpServer, ServerConfig};
use tts_relay::infrastructure::memory::InMemoryRateLimiter;

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},tts_relay={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：PORT > 环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("tts-relay - 文本转语音 HTTP 中继");
    print_config(&config);

    // 创建 TTS 引擎
    let google_config = GoogleTtsClientConfig {
        url: config.tts.google.url.clone(),
        client_id: config.tts.google.client.clone(),
        timeout_secs: config.tts.timeout_secs,
    };
    let google: Arc<dyn TtsEnginePort> = Arc::new(GoogleTtsClient::new(google_config)?);

    let voicevox_config = VoicevoxTtsClientConfig {
        url: config.tts.voicevox.url.clone(),
        api_key: config.tts.voicevox.api_key.clone(),
        timeout_secs: config.tts.timeout_secs,
    };
    let voicevox: Arc<dyn TtsEnginePort> = Arc::new(VoicevoxTtsClient::new(voicevox_config)?);

    tracing::info!(
        engines = ?[google.engine(), voicevox.engine()],
        "TTS engines ready"
    );

    // 创建限流器，并定期清理过期窗口
    let rate_limiter: Option<Arc<dyn RateLimiterPort>> = if config.rate_limit.enabled {
        let window = Duration::from_secs(config.rate_limit.window_secs);
        let limiter: Arc<dyn RateLimiterPort> =
            Arc::new(InMemoryRateLimiter::new(config.rate_limit.max_requests, window));

        let sweeper = limiter.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(window);
            loop {
                interval.tick().await;
                sweeper.purge_expired();
            }
        });

        Some(limiter)
    } else {
        tracing::warn!("Rate limiting is disabled");
        None
    };

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_max_body_bytes(config.server.max_body_bytes);
    let state = AppState::new(google, voicevox, rate_limiter)
        .with_trust_forwarded_for(config.rate_limit.trust_forwarded_for);

    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
