//! Engine Selector - 引擎选择
//!
//! 显式指定优先；未指定时日语走 VOICEVOX，其余走 Google。

use super::{Engine, SynthesisError};

/// 选择引擎
///
/// 纯函数，不做任何 I/O
pub fn select_engine(explicit: Option<&str>, language: &str) -> Result<Engine, SynthesisError> {
    match explicit {
        Some(engine) => engine.parse(),
        None if language.eq_ignore_ascii_case("ja") => Ok(Engine::Voicevox),
        None => Ok(Engine::Google),
    }
}
