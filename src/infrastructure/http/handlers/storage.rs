//! Storage Handlers - 读取生成的音频与封面

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::ApplicationError;
use crate::domain::podcast::StorageId;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn download_blob(
    State(state): State<Arc<AppState>>,
    Path(storage_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let blob = state
        .blob_storage
        .read(StorageId::from_uuid(storage_id))
        .await
        .map_err(ApplicationError::from)?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, blob.content_type)
        .header(header::CONTENT_LENGTH, blob.data.len())
        // 存储句柄不复用，内容不会变化
        .header(header::CACHE_CONTROL, "public, max-age=31536000, immutable")
        .body(Body::from(blob.data))
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}
