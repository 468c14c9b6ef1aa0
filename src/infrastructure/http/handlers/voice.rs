//! Voice Handlers

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::application::ListVoiceTypes;
use crate::domain::podcast::VoiceType;
use crate::infrastructure::http::dto::{ApiResponse, VoicePreviewDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 列出所有音色及试听地址
pub async fn list_voice_types(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<VoicePreviewDto>>> {
    let voices = state
        .list_voice_types_handler
        .handle(ListVoiceTypes)
        .into_iter()
        .map(VoicePreviewDto::from)
        .collect();

    Json(ApiResponse::success(voices))
}

fn preview_content_type(extension: &str) -> &'static str {
    match extension {
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "flac" => "audio/flac",
        "m4a" => "audio/mp4",
        _ => "application/octet-stream",
    }
}

/// 流式返回音色试听样本
pub async fn voice_preview(
    State(state): State<Arc<AppState>>,
    Path(voice_type): Path<String>,
) -> Result<Response, ApiError> {
    let voice = VoiceType::from_str(&voice_type)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown voice type: {}", voice_type)))?;

    let extension = state.voice_previews.extension.trim_start_matches('.');
    let path = state
        .voice_previews
        .voices_dir
        .join(voice.preview_file_name(extension));

    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ApiError::NotFound(format!(
                "Voice preview not found: {}",
                voice
            )));
        }
        Err(e) => {
            return Err(ApiError::Internal(format!(
                "Failed to open voice preview: {}",
                e
            )))
        }
    };

    let file_size = file
        .metadata()
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to get file metadata: {}", e)))?
        .len();

    let body = Body::from_stream(ReaderStream::new(file));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, preview_content_type(extension))
        .header(header::CONTENT_LENGTH, file_size)
        .header(header::CACHE_CONTROL, "public, max-age=86400")
        .body(body)
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_content_type() {
        assert_eq!(preview_content_type("mp3"), "audio/mpeg");
        assert_eq!(preview_content_type("wav"), "audio/wav");
        assert_eq!(preview_content_type("m3"), "application/octet-stream");
    }
}
