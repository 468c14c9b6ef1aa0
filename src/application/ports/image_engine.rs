//! Image Engine Port - 封面生成抽象

use async_trait::async_trait;
use thiserror::Error;

/// 图像生成错误
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone)]
pub struct ImageRequest {
    pub prompt: String,
}

#[derive(Debug, Clone)]
pub struct ImageResponse {
    pub image_data: Vec<u8>,
    pub content_type: String,
}

/// Image Engine Port
#[async_trait]
pub trait ImageEnginePort: Send + Sync {
    async fn generate(&self, request: ImageRequest) -> Result<ImageResponse, ImageError>;
}
