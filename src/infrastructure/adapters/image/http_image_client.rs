//! HTTP Image Client - 调用外部图像生成服务
//!
//! POST {base_url}/images/generations
//! Request: {"model": "dall-e-3", "prompt": "...", "size": "1024x1024", "n": 1}
//! Response: {"data": [{"url": "..."}]}，随后下载该 URL 得到图片字节

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{ImageEnginePort, ImageError, ImageRequest, ImageResponse};

#[derive(Debug, Serialize)]
struct ImageHttpRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
    n: u32,
}

#[derive(Debug, Deserialize)]
struct ImageHttpResponse {
    data: Vec<ImageHttpItem>,
}

#[derive(Debug, Deserialize)]
struct ImageHttpItem {
    url: Option<String>,
}

/// HTTP 图像生成客户端配置
#[derive(Debug, Clone)]
pub struct HttpImageClientConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub size: String,
    /// 请求超时时间（秒），同时作用于图片下载
    pub timeout_secs: u64,
}

impl Default for HttpImageClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "dall-e-3".to_string(),
            size: "1024x1024".to_string(),
            timeout_secs: 120,
        }
    }
}

impl HttpImageClientConfig {
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

/// HTTP 图像生成客户端
pub struct HttpImageClient {
    client: Client,
    config: HttpImageClientConfig,
}

fn map_send_error(e: reqwest::Error) -> ImageError {
    if e.is_timeout() {
        ImageError::Timeout
    } else if e.is_connect() {
        ImageError::NetworkError(format!("Cannot connect to image service: {}", e))
    } else {
        ImageError::NetworkError(e.to_string())
    }
}

impl HttpImageClient {
    pub fn new(config: HttpImageClientConfig) -> Result<Self, ImageError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ImageError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn generations_url(&self) -> String {
        format!(
            "{}/images/generations",
            self.config.base_url.trim_end_matches('/')
        )
    }

    async fn download(&self, url: &str) -> Result<ImageResponse, ImageError> {
        let response = self.client.get(url).send().await.map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageError::ServiceError(format!(
                "image download failed: HTTP {}",
                status
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| v.starts_with("image/"))
            .unwrap_or("image/png")
            .to_string();

        let image_data = response
            .bytes()
            .await
            .map_err(|e| ImageError::InvalidResponse(format!("Failed to read image: {}", e)))?
            .to_vec();

        Ok(ImageResponse {
            image_data,
            content_type,
        })
    }
}

#[async_trait]
impl ImageEnginePort for HttpImageClient {
    async fn generate(&self, request: ImageRequest) -> Result<ImageResponse, ImageError> {
        let body = ImageHttpRequest {
            model: &self.config.model,
            prompt: &request.prompt,
            size: &self.config.size,
            n: 1,
        };

        tracing::debug!(
            url = %self.generations_url(),
            prompt_len = request.prompt.len(),
            "Sending image generation request"
        );

        let mut builder = self.client.post(self.generations_url()).json(&body);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }
        let response = builder.send().await.map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ImageError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let parsed: ImageHttpResponse = response
            .json()
            .await
            .map_err(|e| ImageError::InvalidResponse(e.to_string()))?;

        let url = parsed
            .data
            .into_iter()
            .find_map(|item| item.url)
            .ok_or_else(|| ImageError::InvalidResponse("no image url in response".to_string()))?;

        let image = self.download(&url).await?;

        tracing::info!(
            image_size = image.image_data.len(),
            content_type = %image.content_type,
            "Image generation completed"
        );

        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generations_url() {
        let client = HttpImageClient::new(HttpImageClientConfig::new("http://localhost:9000/v1/"))
            .unwrap();
        assert_eq!(
            client.generations_url(),
            "http://localhost:9000/v1/images/generations"
        );
    }

    #[test]
    fn test_response_without_url() {
        let parsed: ImageHttpResponse =
            serde_json::from_str(r#"{"data":[{"b64_json":"AAAA"}]}"#).unwrap();
        assert!(parsed.data.into_iter().find_map(|i| i.url).is_none());
    }
}
