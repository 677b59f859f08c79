//! 应用层错误定义
//!
//! 统一的命令错误类型

use thiserror::Error;

use crate::application::ports::TtsError;
use crate::domain::SynthesisError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 请求校验失败 / 引擎不支持
    #[error(transparent)]
    InvalidRequest(#[from] SynthesisError),

    /// 上游 TTS 服务失败
    #[error(transparent)]
    Upstream(#[from] TtsError),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}
