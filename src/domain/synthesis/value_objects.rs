//! Synthesis Context - Value Objects

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::SynthesisError;

/// TTS 引擎
///
/// - `Google`: 直接返回音频字节（单次请求）
/// - `Voicevox`: 先返回 mp3 地址，再下载音频（两次请求），日语专用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Google,
    Voicevox,
}

impl Engine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Google => "google",
            Engine::Voicevox => "voicevox",
        }
    }
}

impl FromStr for Engine {
    type Err = SynthesisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(Engine::Google),
            "voicevox" => Ok(Engine::Voicevox),
            _ => Err(SynthesisError::UnsupportedEngine(s.to_string())),
        }
    }
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// VOICEVOX 说话人 ID
///
/// 不校验上游实际支持的范围，未指定时回退到 [`SpeakerId::DEFAULT`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpeakerId(i64);

impl SpeakerId {
    /// 默认说话人（ずんだもん ノーマル）
    pub const DEFAULT: SpeakerId = SpeakerId(3);

    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// 解析可选的说话人 ID，缺失时使用默认值
    pub fn resolve(id: Option<i64>) -> Self {
        id.map(Self).unwrap_or(Self::DEFAULT)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl Default for SpeakerId {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for SpeakerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
