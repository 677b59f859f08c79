//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. `PORT` 环境变量（仅覆盖 server.port）
//! 2. 环境变量（前缀 `TTS_RELAY_`）
//! 3. 配置文件（config.toml）
//! 4. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// # 环境变量示例
/// - `PORT=8080`
/// - `TTS_RELAY_SERVER__HOST=127.0.0.1`
/// - `TTS_RELAY_TTS__TIMEOUT_SECS=10`
/// - `TTS_RELAY_TTS__VOICEVOX__API_KEY=xxxx`
/// - `TTS_RELAY_RATE_LIMIT__MAX_REQUESTS=100`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// 路径为 None 时搜索当前目录下的默认配置文件（可不存在）
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    build_config(config_path, std::env::var("PORT").ok())
}

fn build_config(
    config_path: Option<&Path>,
    port_override: Option<String>,
) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("server.max_body_bytes", 100 * 1024)?
        .set_default("tts.timeout_secs", 25)?
        .set_default("tts.google.url", "https://translate.google.com/translate_tts")?
        .set_default("tts.google.client", "tw-ob")?
        .set_default("tts.voicevox.url", "https://api.tts.quest/v3/voicevox/synthesis")?
        .set_default("rate_limit.enabled", true)?
        .set_default("rate_limit.window_secs", 60)?
        .set_default("rate_limit.max_requests", 30)?
        .set_default("rate_limit.trust_forwarded_for", false)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 带前缀的环境变量，层级分隔符 __
    builder = builder.add_source(
        Environment::with_prefix("TTS_RELAY")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. PORT 最高优先级
    builder = builder.set_override_option("server.port", port_override)?;

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.tts.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "TTS timeout cannot be 0".to_string(),
        ));
    }

    if config.tts.google.url.is_empty() || config.tts.voicevox.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS provider URL cannot be empty".to_string(),
        ));
    }

    if config.rate_limit.enabled
        && (config.rate_limit.window_secs == 0 || config.rate_limit.max_requests == 0)
    {
        return Err(ConfigError::ValidationError(
            "Rate limit window and max requests must be positive when enabled".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Max Body Size: {} bytes", config.server.max_body_bytes);
    tracing::info!("TTS Timeout: {}s", config.tts.timeout_secs);
    tracing::info!("Google TTS URL: {}", config.tts.google.url);
    tracing::info!("VOICEVOX URL: {}", config.tts.voicevox.url);
    tracing::info!(
        "VOICEVOX API Key: {}",
        if config.tts.voicevox.api_key.is_some() { "set" } else { "not set" }
    );
    tracing::info!("Rate Limit Enabled: {}", config.rate_limit.enabled);
    if config.rate_limit.enabled {
        tracing::info!(
            "Rate Limit: {} requests / {}s",
            config.rate_limit.max_requests,
            config.rate_limit.window_secs
        );
        tracing::info!("Trust X-Forwarded-For: {}", config.rate_limit.trust_forwarded_for);
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_validation_passes_for_default_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_provider_url() {
        let mut config = AppConfig::default();
        config.tts.voicevox.url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_window() {
        let mut config = AppConfig::default();
        config.rate_limit.window_secs = 0;
        assert!(validate_config(&config).is_err());

        config.rate_limit.enabled = false;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            r#"
[server]
port = 8080

[tts]
timeout_secs = 10

[tts.voicevox]
api_key = "secret"

[rate_limit]
max_requests = 5
"#,
        );

        let config = build_config(Some(file.path()), None).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.tts.timeout_secs, 10);
        assert_eq!(config.tts.voicevox.api_key.as_deref(), Some("secret"));
        assert_eq!(config.tts.google.client, "tw-ob");
        assert_eq!(config.rate_limit.max_requests, 5);
        assert_eq!(config.rate_limit.window_secs, 60);
    }

    #[test]
    fn test_port_override_wins() {
        let file = write_config("[server]\nport = 8080\n");

        let config = build_config(Some(file.path()), Some("4000".to_string())).unwrap();

        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn test_invalid_file_values_fail() {
        let file = write_config("[rate_limit]\nmax_requests = 0\n");

        let err = build_config(Some(file.path()), None).unwrap_err();

        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
