//! Fake Speech Client - 用于测试的语音合成客户端
//!
//! 返回内存中生成的静音 WAV，不调用外部服务

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::{SpeechEnginePort, SpeechError, SpeechRequest, SpeechResponse};

/// Fake Speech Client 配置
#[derive(Debug, Clone)]
pub struct FakeSpeechClientConfig {
    /// 固定返回的音频时长（秒）
    pub duration_secs: f64,
    pub sample_rate: u32,
    /// 模拟延迟（毫秒）
    pub latency_ms: u64,
    /// 为 true 时所有请求返回服务错误
    pub fail: bool,
}

impl Default for FakeSpeechClientConfig {
    fn default() -> Self {
        Self {
            duration_secs: 1.0,
            sample_rate: 16000,
            latency_ms: 0,
            fail: false,
        }
    }
}

/// 生成 16-bit 单声道静音 WAV
pub fn silent_wav(sample_rate: u32, duration_secs: f64) -> Vec<u8> {
    let samples = (sample_rate as f64 * duration_secs).round() as u32;
    let data_len = samples * 2;
    let byte_rate = sample_rate * 2;

    let mut wav = Vec::with_capacity(44 + data_len as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    wav.resize(44 + data_len as usize, 0);
    wav
}

/// Fake Speech Client
pub struct FakeSpeechClient {
    config: FakeSpeechClientConfig,
    audio_data: Vec<u8>,
    calls: AtomicUsize,
}

impl FakeSpeechClient {
    pub fn new(config: FakeSpeechClientConfig) -> Self {
        let audio_data = silent_wav(config.sample_rate, config.duration_secs);
        tracing::info!(
            duration_secs = config.duration_secs,
            sample_rate = config.sample_rate,
            "FakeSpeechClient initialized"
        );
        Self {
            config,
            audio_data,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(FakeSpeechClientConfig::default())
    }

    pub fn failing() -> Self {
        Self::new(FakeSpeechClientConfig {
            fail: true,
            ..Default::default()
        })
    }

    /// 已收到的合成请求数
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechEnginePort for FakeSpeechClient {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResponse, SpeechError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(
            input_len = request.input.len(),
            voice = %request.voice_type,
            "FakeSpeechClient: returning silent audio"
        );

        if self.config.latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.config.latency_ms)).await;
        }

        if self.config.fail {
            return Err(SpeechError::ServiceError("fake speech failure".to_string()));
        }

        Ok(SpeechResponse {
            audio_data: self.audio_data.clone(),
            content_type: "audio/wav".to_string(),
        })
    }
}
