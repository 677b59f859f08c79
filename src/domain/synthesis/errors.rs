//! Synthesis Context - Errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    /// 缺少 text 字段，或 text 不是字符串，或 trim 后为空
    #[error("Missing 'text'")]
    MissingText,

    /// 请求体不是合法 JSON
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    /// 显式指定了未知引擎
    #[error("Unsupported engine: {0}")]
    UnsupportedEngine(String),
}
