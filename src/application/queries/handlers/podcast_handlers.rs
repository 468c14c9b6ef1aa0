//! Podcast Query Handlers

use std::sync::Arc;
use uuid::Uuid;

use crate::application::error::ApplicationError;
use crate::application::ports::{PodcastRecord, PodcastRepositoryPort, UserRepositoryPort};
use crate::application::queries::{GetCreatorProfile, GetPodcast};

// ============================================================================
// Response DTOs
// ============================================================================

/// 播客详情响应
#[derive(Debug, Clone)]
pub struct PodcastResponse {
    pub id: Uuid,
    pub author_ref: String,
    pub author_name: String,
    pub author_image_url: String,
    pub title: String,
    pub description: String,
    pub audio_url: String,
    pub audio_storage_id: Uuid,
    pub audio_duration_secs: f64,
    pub image_url: String,
    pub image_storage_id: Uuid,
    pub voice_type: String,
    pub voice_prompt: String,
    pub image_prompt: String,
    pub views: u64,
    pub created_at: String,
}

impl From<PodcastRecord> for PodcastResponse {
    fn from(record: PodcastRecord) -> Self {
        Self {
            id: record.id,
            author_ref: record.author_ref,
            author_name: record.author_name,
            author_image_url: record.author_image_url,
            title: record.title,
            description: record.description,
            audio_url: record.audio_url,
            audio_storage_id: record.audio_storage_id,
            audio_duration_secs: record.audio_duration_secs,
            image_url: record.image_url,
            image_storage_id: record.image_storage_id,
            voice_type: record.voice_type,
            voice_prompt: record.voice_prompt,
            image_prompt: record.image_prompt,
            views: record.views,
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

/// 创作者主页响应
#[derive(Debug, Clone)]
pub struct CreatorProfileResponse {
    pub identity_ref: String,
    pub name: String,
    pub image_url: String,
    pub podcasts: Vec<PodcastResponse>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GetPodcast Handler
pub struct GetPodcastHandler {
    podcast_repo: Arc<dyn PodcastRepositoryPort>,
}

impl GetPodcastHandler {
    pub fn new(podcast_repo: Arc<dyn PodcastRepositoryPort>) -> Self {
        Self { podcast_repo }
    }

    pub async fn handle(&self, query: GetPodcast) -> Result<PodcastResponse, ApplicationError> {
        let podcast = self
            .podcast_repo
            .find_by_id(query.podcast_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Podcast", query.podcast_id))?;

        Ok(PodcastResponse::from(podcast))
    }
}

/// GetCreatorProfile Handler
pub struct GetCreatorProfileHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
    podcast_repo: Arc<dyn PodcastRepositoryPort>,
}

impl GetCreatorProfileHandler {
    pub fn new(
        user_repo: Arc<dyn UserRepositoryPort>,
        podcast_repo: Arc<dyn PodcastRepositoryPort>,
    ) -> Self {
        Self {
            user_repo,
            podcast_repo,
        }
    }

    pub async fn handle(
        &self,
        query: GetCreatorProfile,
    ) -> Result<CreatorProfileResponse, ApplicationError> {
        let user = self
            .user_repo
            .find_by_identity(&query.identity_ref)
            .await?
            .ok_or_else(|| ApplicationError::not_found_str("User", &query.identity_ref))?;

        let podcasts = self.podcast_repo.find_by_author(&user.identity_ref).await?;

        Ok(CreatorProfileResponse {
            identity_ref: user.identity_ref,
            name: user.name,
            image_url: user.image_url,
            podcasts: podcasts.into_iter().map(PodcastResponse::from).collect(),
        })
    }
}
