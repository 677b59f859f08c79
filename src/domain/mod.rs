//! Domain Layer - 领域层
//!
//! Synthesis Context: 合成请求、引擎选择

pub mod synthesis;

pub use synthesis::{
    parse_synthesis_request, select_engine, Engine, SpeakerId, SynthesisError, SynthesisRequest,
};
