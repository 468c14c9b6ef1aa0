//! Audio Probe Port - 音频时长探测

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),
}

/// Audio Probe Port
///
/// 从编码后的音频数据中读取时长
pub trait AudioProbePort: Send + Sync {
    /// 时长（秒）
    ///
    /// `content_type` 用作格式提示，如 `audio/mpeg`、`audio/wav`
    fn duration_secs(&self, data: &[u8], content_type: &str) -> Result<f64, ProbeError>;
}
