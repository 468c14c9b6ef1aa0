//! Speech Engine Port - 语音合成抽象
//!
//! 定义旁白合成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::podcast::VoiceType;

/// 语音合成错误
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 合成请求
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    /// 要朗读的文本
    pub input: String,
    pub voice_type: VoiceType,
}

/// 合成响应
#[derive(Debug, Clone)]
pub struct SpeechResponse {
    /// 编码后的音频数据
    pub audio_data: Vec<u8>,
    pub content_type: String,
}

/// Speech Engine Port
///
/// 外部语音合成服务的抽象接口
#[async_trait]
pub trait SpeechEnginePort: Send + Sync {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResponse, SpeechError>;

    /// 检查服务是否可用
    async fn health_check(&self) -> bool {
        true
    }
}
