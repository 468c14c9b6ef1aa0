//! Symphonia Probe - 基于 symphonia 读取音频时长
//!
//! 优先使用容器头中的帧数，缺失时（如无 Xing 头的 MP3）累加数据包时长

use std::io::Cursor;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{AudioProbePort, ProbeError};

/// 基于 symphonia 的时长探测
#[derive(Debug, Default, Clone)]
pub struct SymphoniaProbe;

impl SymphoniaProbe {
    pub fn new() -> Self {
        Self
    }

    fn extension_hint(content_type: &str) -> Option<&'static str> {
        match content_type {
            "audio/mpeg" | "audio/mp3" => Some("mp3"),
            "audio/wav" | "audio/wave" | "audio/x-wav" => Some("wav"),
            _ => None,
        }
    }
}

impl AudioProbePort for SymphoniaProbe {
    fn duration_secs(&self, data: &[u8], content_type: &str) -> Result<f64, ProbeError> {
        let cursor = Cursor::new(data.to_vec());
        let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = Self::extension_hint(content_type) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| ProbeError::UnsupportedFormat(format!("{}: {}", content_type, e)))?;

        let mut format = probed.format;

        let track = format
            .default_track()
            .ok_or_else(|| ProbeError::DecodingError("No audio track found".to_string()))?;

        let sample_rate = track
            .codec_params
            .sample_rate
            .filter(|rate| *rate > 0)
            .ok_or_else(|| ProbeError::DecodingError("Unknown sample rate".to_string()))?;

        if let Some(n_frames) = track.codec_params.n_frames {
            return Ok(n_frames as f64 / sample_rate as f64);
        }

        let track_id = track.id;
        let mut frames: u64 = 0;
        loop {
            let packet = match format.next_packet() {
                Ok(p) => p,
                Err(symphonia::core::errors::Error::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => {
                    return Err(ProbeError::DecodingError(format!(
                        "Packet read error: {}",
                        e
                    )));
                }
            };
            if packet.track_id() == track_id {
                frames += packet.dur;
            }
        }

        Ok(frames as f64 / sample_rate as f64)
    }
}
