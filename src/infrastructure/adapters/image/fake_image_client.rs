//! Fake Image Client - 用于测试的封面生成客户端

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::{ImageEnginePort, ImageError, ImageRequest, ImageResponse};

/// 1x1 透明 PNG
const PLACEHOLDER_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// Fake Image Client
pub struct FakeImageClient {
    fail: bool,
    calls: AtomicUsize,
}

impl FakeImageClient {
    pub fn new() -> Self {
        Self {
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for FakeImageClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageEnginePort for FakeImageClient {
    async fn generate(&self, request: ImageRequest) -> Result<ImageResponse, ImageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(
            prompt_len = request.prompt.len(),
            "FakeImageClient: returning placeholder image"
        );

        if self.fail {
            return Err(ImageError::ServiceError("fake image failure".to_string()));
        }

        Ok(ImageResponse {
            image_data: PLACEHOLDER_PNG.to_vec(),
            content_type: "image/png".to_string(),
        })
    }
}
