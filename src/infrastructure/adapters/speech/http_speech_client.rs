//! HTTP Speech Client - 调用外部语音合成服务
//!
//! 实现 SpeechEnginePort trait
//!
//! 外部 API:
//! POST {base_url}/audio/speech
//! Request: {"model": "tts-1", "input": "...", "voice": "alloy", "response_format": "mp3"}
//! Response: 编码后的音频二进制

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{SpeechEnginePort, SpeechError, SpeechRequest, SpeechResponse};

/// 合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct SpeechHttpRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
}

/// HTTP 语音合成客户端配置
#[derive(Debug, Clone)]
pub struct HttpSpeechClientConfig {
    /// 服务基础 URL
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    /// 输出格式（mp3 / wav）
    pub response_format: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpSpeechClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "tts-1".to_string(),
            response_format: "mp3".to_string(),
            timeout_secs: 120,
        }
    }
}

impl HttpSpeechClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }
}

/// 输出格式对应的 MIME 类型
fn content_type_for(format: &str) -> &'static str {
    match format {
        "wav" => "audio/wav",
        "opus" => "audio/ogg",
        "flac" => "audio/flac",
        "aac" => "audio/aac",
        _ => "audio/mpeg",
    }
}

/// HTTP 语音合成客户端
pub struct HttpSpeechClient {
    client: Client,
    config: HttpSpeechClientConfig,
}

impl HttpSpeechClient {
    pub fn new(config: HttpSpeechClientConfig) -> Result<Self, SpeechError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SpeechError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn speech_url(&self) -> String {
        format!("{}/audio/speech", self.config.base_url.trim_end_matches('/'))
    }

    fn models_url(&self) -> String {
        format!("{}/models", self.config.base_url.trim_end_matches('/'))
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }
}

#[async_trait]
impl SpeechEnginePort for HttpSpeechClient {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResponse, SpeechError> {
        let body = SpeechHttpRequest {
            model: &self.config.model,
            input: &request.input,
            voice: request.voice_type.as_str(),
            response_format: &self.config.response_format,
        };

        tracing::debug!(
            url = %self.speech_url(),
            input_len = request.input.len(),
            voice = %request.voice_type,
            "Sending speech synthesis request"
        );

        let response = self
            .authorized(self.client.post(self.speech_url()))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SpeechError::Timeout
                } else if e.is_connect() {
                    SpeechError::NetworkError(format!("Cannot connect to speech service: {}", e))
                } else {
                    SpeechError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SpeechError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| v.starts_with("audio/"))
            .map(|v| v.to_string())
            .unwrap_or_else(|| content_type_for(&self.config.response_format).to_string());

        let audio_data = response
            .bytes()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        if audio_data.is_empty() {
            return Err(SpeechError::InvalidResponse("empty audio body".to_string()));
        }

        tracing::info!(
            audio_size = audio_data.len(),
            content_type = %content_type,
            "Speech synthesis completed"
        );

        Ok(SpeechResponse {
            audio_data,
            content_type,
        })
    }

    async fn health_check(&self) -> bool {
        match self
            .authorized(self.client.get(self.models_url()))
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = HttpSpeechClientConfig::new("http://example.com:9000/v1/")
            .with_timeout(60)
            .with_api_key(Some("sk-test".to_string()));
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.model, "tts-1");

        let client = HttpSpeechClient::new(config).unwrap();
        assert_eq!(client.speech_url(), "http://example.com:9000/v1/audio/speech");
    }

    #[test]
    fn test_content_type_for_format() {
        assert_eq!(content_type_for("mp3"), "audio/mpeg");
        assert_eq!(content_type_for("wav"), "audio/wav");
    }
}
