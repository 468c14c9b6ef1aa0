//! Data Transfer Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{
    CreatorProfileResponse, DraftResponse, GenerateAudioResponse, GenerateThumbnailResponse,
    PodcastResponse, SelectVoiceResponse, SubmitDraftResponse, UserRecord, VoiceTypeResponse,
};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(Empty {}),
        }
    }
}

// ============================================================================
// User DTOs
// ============================================================================

/// 身份提供方同步过来的用户资料
#[derive(Debug, Deserialize)]
pub struct UpsertUserRequest {
    pub identity_ref: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub image_url: String,
}

#[derive(Debug, Deserialize)]
pub struct GetProfileRequest {
    pub identity_ref: String,
}

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: Uuid,
    pub identity_ref: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub created_at: String,
}

impl From<UserRecord> for UserDto {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            identity_ref: user.identity_ref,
            name: user.name,
            email: user.email,
            image_url: user.image_url,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatorProfileDto {
    pub identity_ref: String,
    pub name: String,
    pub image_url: String,
    pub podcasts: Vec<PodcastDto>,
}

impl From<CreatorProfileResponse> for CreatorProfileDto {
    fn from(profile: CreatorProfileResponse) -> Self {
        Self {
            identity_ref: profile.identity_ref,
            name: profile.name,
            image_url: profile.image_url,
            podcasts: profile.podcasts.into_iter().map(PodcastDto::from).collect(),
        }
    }
}

// ============================================================================
// Draft DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct DraftIdRequest {
    pub draft_id: Uuid,
}

/// 部分更新，缺省字段保持不变
#[derive(Debug, Deserialize)]
pub struct UpdateDraftRequest {
    pub draft_id: Uuid,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub voice_prompt: Option<String>,
    #[serde(default)]
    pub image_prompt: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectVoiceRequest {
    pub draft_id: Uuid,
    pub voice_type: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateAudioRequest {
    pub draft_id: Uuid,
    #[serde(default)]
    pub voice_prompt: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateThumbnailRequest {
    pub draft_id: Uuid,
    #[serde(default)]
    pub image_prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DraftDto {
    pub id: Uuid,
    pub author_ref: String,
    pub title: String,
    pub description: String,
    pub voice_type: Option<String>,
    pub voice_prompt: String,
    pub image_prompt: String,
    pub audio_url: Option<String>,
    pub audio_storage_id: Option<Uuid>,
    pub audio_duration_secs: Option<f64>,
    pub image_url: Option<String>,
    pub image_storage_id: Option<Uuid>,
    pub state: String,
    pub is_submitting: bool,
    pub can_submit: bool,
    pub submit_label: String,
    pub missing_assets: Vec<String>,
    pub updated_at: String,
}

impl From<DraftResponse> for DraftDto {
    fn from(draft: DraftResponse) -> Self {
        Self {
            id: draft.id,
            author_ref: draft.author_ref,
            title: draft.title,
            description: draft.description,
            voice_type: draft.voice_type,
            voice_prompt: draft.voice_prompt,
            image_prompt: draft.image_prompt,
            audio_url: draft.audio_url,
            audio_storage_id: draft.audio_storage_id,
            audio_duration_secs: draft.audio_duration_secs,
            image_url: draft.image_url,
            image_storage_id: draft.image_storage_id,
            state: draft.state,
            is_submitting: draft.is_submitting,
            can_submit: draft.can_submit,
            submit_label: draft.submit_label,
            missing_assets: draft.missing_assets,
            updated_at: draft.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VoicePreviewDto {
    pub voice_type: String,
    pub preview_url: String,
}

impl From<SelectVoiceResponse> for VoicePreviewDto {
    fn from(r: SelectVoiceResponse) -> Self {
        Self {
            voice_type: r.voice_type.as_str().to_string(),
            preview_url: r.preview_url,
        }
    }
}

impl From<VoiceTypeResponse> for VoicePreviewDto {
    fn from(r: VoiceTypeResponse) -> Self {
        Self {
            voice_type: r.voice_type,
            preview_url: r.preview_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GeneratedAudioDto {
    pub audio_url: String,
    pub storage_id: Uuid,
    pub duration_secs: f64,
}

impl From<GenerateAudioResponse> for GeneratedAudioDto {
    fn from(r: GenerateAudioResponse) -> Self {
        Self {
            audio_url: r.audio_url,
            storage_id: r.storage_id,
            duration_secs: r.duration_secs,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GeneratedImageDto {
    pub image_url: String,
    pub storage_id: Uuid,
}

impl From<GenerateThumbnailResponse> for GeneratedImageDto {
    fn from(r: GenerateThumbnailResponse) -> Self {
        Self {
            image_url: r.image_url,
            storage_id: r.storage_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitDraftDto {
    pub podcast_id: Uuid,
    /// 客户端应跳转的路径
    pub redirect: String,
}

impl From<SubmitDraftResponse> for SubmitDraftDto {
    fn from(r: SubmitDraftResponse) -> Self {
        Self {
            podcast_id: r.podcast_id,
            redirect: r.redirect,
        }
    }
}

// ============================================================================
// Podcast DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GetPodcastRequest {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct PodcastDto {
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

impl From<PodcastResponse> for PodcastDto {
    fn from(p: PodcastResponse) -> Self {
        Self {
            id: p.id,
            author_ref: p.author_ref,
            author_name: p.author_name,
            author_image_url: p.author_image_url,
            title: p.title,
            description: p.description,
            audio_url: p.audio_url,
            audio_storage_id: p.audio_storage_id,
            audio_duration_secs: p.audio_duration_secs,
            image_url: p.image_url,
            image_storage_id: p.image_storage_id,
            voice_type: p.voice_type,
            voice_prompt: p.voice_prompt,
            image_prompt: p.image_prompt,
            views: p.views,
            created_at: p.created_at,
        }
    }
}
