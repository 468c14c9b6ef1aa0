//! Podcast Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::GetPodcast;
use crate::infrastructure::http::dto::{ApiResponse, GetPodcastRequest, PodcastDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn get_podcast(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GetPodcastRequest>,
) -> Result<Json<ApiResponse<PodcastDto>>, ApiError> {
    let query = GetPodcast { podcast_id: req.id };

    let podcast = state.get_podcast_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(podcast.into())))
}
