//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// TTS 引擎配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 限流配置
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口（`PORT` 环境变量优先）
    #[serde(default = "default_port")]
    pub port: u16,

    /// 请求体大小上限（字节）
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_body_bytes() -> usize {
    100 * 1024 // 100 KB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// TTS 引擎配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    /// 单次上游请求超时时间（秒）
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub google: GoogleConfig,

    #[serde(default)]
    pub voicevox: VoicevoxConfig,
}

fn default_tts_timeout() -> u64 {
    25
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_tts_timeout(),
            google: GoogleConfig::default(),
            voicevox: VoicevoxConfig::default(),
        }
    }
}

/// Google TTS 配置
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    #[serde(default = "default_google_url")]
    pub url: String,

    /// `client` 查询参数
    #[serde(default = "default_google_client")]
    pub client: String,
}

fn default_google_url() -> String {
    "https://translate.google.com/translate_tts".to_string()
}

fn default_google_client() -> String {
    "tw-ob".to_string()
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            url: default_google_url(),
            client: default_google_client(),
        }
    }
}

/// VOICEVOX 配置
#[derive(Debug, Clone, Deserialize)]
pub struct VoicevoxConfig {
    #[serde(default = "default_voicevox_url")]
    pub url: String,

    /// API Key，未设置时使用免费额度
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_voicevox_url() -> String {
    "https://api.tts.quest/v3/voicevox/synthesis".to_string()
}

impl Default for VoicevoxConfig {
    fn default() -> Self {
        Self {
            url: default_voicevox_url(),
            api_key: None,
        }
    }
}

/// 限流配置
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// 是否启用限流
    #[serde(default = "default_rate_limit_enabled")]
    pub enabled: bool,

    /// 窗口长度（秒）
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    /// 每个客户端每个窗口的最大请求数
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// 部署在反向代理之后时，用 X-Forwarded-For 识别客户端
    #[serde(default)]
    pub trust_forwarded_for: bool,
}

fn default_rate_limit_enabled() -> bool {
    true
}

fn default_window_secs() -> u64 {
    60
}

fn default_max_requests() -> u32 {
    30
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_rate_limit_enabled(),
            window_secs: default_window_secs(),
            max_requests: default_max_requests(),
            trust_forwarded_for: false,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
