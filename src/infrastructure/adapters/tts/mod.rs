//! TTS Adapters - 上游 TTS 服务客户端实现

mod fake_tts_client;
mod google_tts_client;
mod response;
mod voicevox_tts_client;

pub use fake_tts_client::FakeTtsClient;
pub use google_tts_client::{GoogleTtsClient, GoogleTtsClientConfig};
pub use voicevox_tts_client::{VoicevoxTtsClient, VoicevoxTtsClientConfig};
