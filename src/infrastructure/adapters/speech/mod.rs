//! Speech Adapter - 语音合成客户端实现

mod fake_speech_client;
mod http_speech_client;

pub use fake_speech_client::{silent_wav, FakeSpeechClient, FakeSpeechClientConfig};
pub use http_speech_client::*;
