//! HTTP Handlers

mod fallback;
mod health;
mod tts;

pub use fallback::*;
pub use health::*;
pub use tts::*;
