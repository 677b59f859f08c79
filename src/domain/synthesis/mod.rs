//! Synthesis Context - 语音合成限界上下文
//!
//! 职责:
//! - 请求体解析与校验
//! - 引擎选择（显式指定 / 按语言默认）
//! - 引擎、说话人等值对象

mod engine_selector;
mod errors;
mod request;
mod value_objects;

pub use engine_selector::select_engine;
pub use errors::SynthesisError;
pub use request::{parse_synthesis_request, SynthesisRequest, DEFAULT_LANGUAGE};
pub use value_objects::{Engine, SpeakerId};
