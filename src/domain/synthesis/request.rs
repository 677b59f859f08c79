//! Synthesis Request - 请求体解析与校验
//!
//! 请求体先解析为 `serde_json::Value`，再逐字段校验为强类型的 [`SynthesisRequest`]。
//! 字段类型不符时按宽松规则回退（lang → "en"，speaker → 未指定），
//! 只有 text 是硬性要求。

use serde_json::Value;

use super::SynthesisError;

/// 默认语言
pub const DEFAULT_LANGUAGE: &str = "en";

/// 经过校验的合成请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    /// 已 trim 的非空文本
    pub text: String,
    /// 语言代码，默认 "en"
    pub language: String,
    /// 显式指定的引擎（原始字符串，由引擎选择器判定是否支持）
    pub engine: Option<String>,
    /// 说话人 ID（仅 VOICEVOX 使用）
    pub speaker: Option<i64>,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: DEFAULT_LANGUAGE.to_string(),
            engine: None,
            speaker: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = Some(engine.into());
        self
    }

    pub fn with_speaker(mut self, speaker: i64) -> Self {
        self.speaker = Some(speaker);
        self
    }

    /// 从 JSON 值校验出请求
    ///
    /// 非对象的 JSON 等同于空对象
    pub fn from_value(value: &Value) -> Result<Self, SynthesisError> {
        let text = value
            .get("text")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(SynthesisError::MissingText)?;

        let language = value
            .get("lang")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_LANGUAGE);

        Ok(Self {
            text: text.to_string(),
            language: language.to_string(),
            engine: value.get("engine").and_then(engine_field),
            speaker: value.get("speaker").and_then(speaker_field),
        })
    }
}

/// 解析原始请求体
///
/// 空请求体视为 `{}`
pub fn parse_synthesis_request(body: &[u8]) -> Result<SynthesisRequest, SynthesisError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return SynthesisRequest::from_value(&Value::Object(Default::default()));
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|e| SynthesisError::InvalidJson(e.to_string()))?;

    SynthesisRequest::from_value(&value)
}

/// engine 字段：null / 空字符串视为未指定，非字符串保留其 JSON 文本以便拒绝
fn engine_field(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// speaker 字段：整数或整数字符串，其他一律视为未指定
fn speaker_field(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
