//! Draft Handlers
//!
//! 所有草稿操作都以 `X-Identity-Ref` 标识的作者为主体

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{
    CreateDraft, DiscardDraft, GenerateAudio, GenerateThumbnail, GetDraft, SelectVoice,
    SubmitDraft, UpdateDraftFields,
};
use crate::domain::podcast::{DraftId, VoiceType};
use crate::infrastructure::http::auth::CurrentUser;
use crate::infrastructure::http::dto::{
    ApiResponse, DraftDto, DraftIdRequest, Empty, GenerateAudioRequest, GenerateThumbnailRequest,
    GeneratedAudioDto, GeneratedImageDto, SelectVoiceRequest, SubmitDraftDto, UpdateDraftRequest,
    VoicePreviewDto,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn create_draft(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<DraftDto>>, ApiError> {
    let cmd = CreateDraft {
        author_ref: user.identity_ref,
    };

    let draft = state.create_draft_handler.handle(cmd)?;

    Ok(Json(ApiResponse::success(draft.into())))
}

pub async fn get_draft(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(req): Json<DraftIdRequest>,
) -> Result<Json<ApiResponse<DraftDto>>, ApiError> {
    let query = GetDraft {
        draft_id: DraftId::from_uuid(req.draft_id),
        author_ref: user.identity_ref,
    };

    let draft = state.get_draft_handler.handle(query)?;

    Ok(Json(ApiResponse::success(draft.into())))
}

pub async fn update_draft(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(req): Json<UpdateDraftRequest>,
) -> Result<Json<ApiResponse<DraftDto>>, ApiError> {
    let cmd = UpdateDraftFields {
        draft_id: DraftId::from_uuid(req.draft_id),
        author_ref: user.identity_ref,
        title: req.title,
        description: req.description,
        voice_prompt: req.voice_prompt,
        image_prompt: req.image_prompt,
    };

    let draft = state.update_draft_handler.handle(cmd)?;

    Ok(Json(ApiResponse::success(draft.into())))
}

pub async fn select_voice(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(req): Json<SelectVoiceRequest>,
) -> Result<Json<ApiResponse<VoicePreviewDto>>, ApiError> {
    let voice_type = VoiceType::from_str(&req.voice_type)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown voice type: {}", req.voice_type)))?;

    let cmd = SelectVoice {
        draft_id: DraftId::from_uuid(req.draft_id),
        author_ref: user.identity_ref,
        voice_type,
    };

    let preview = state.select_voice_handler.handle(cmd)?;

    Ok(Json(ApiResponse::success(preview.into())))
}

pub async fn generate_audio(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(req): Json<GenerateAudioRequest>,
) -> Result<Json<ApiResponse<GeneratedAudioDto>>, ApiError> {
    let cmd = GenerateAudio {
        draft_id: DraftId::from_uuid(req.draft_id),
        author_ref: user.identity_ref,
        voice_prompt: req.voice_prompt,
    };

    let audio = state.generate_audio_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(audio.into())))
}

pub async fn generate_thumbnail(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(req): Json<GenerateThumbnailRequest>,
) -> Result<Json<ApiResponse<GeneratedImageDto>>, ApiError> {
    let cmd = GenerateThumbnail {
        draft_id: DraftId::from_uuid(req.draft_id),
        author_ref: user.identity_ref,
        image_prompt: req.image_prompt,
    };

    let image = state.generate_thumbnail_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(image.into())))
}

/// 提交发布，成功后客户端跳转到 `redirect`
pub async fn submit_draft(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(req): Json<DraftIdRequest>,
) -> Result<Json<ApiResponse<SubmitDraftDto>>, ApiError> {
    let cmd = SubmitDraft {
        draft_id: DraftId::from_uuid(req.draft_id),
        author_ref: user.identity_ref,
    };

    let result = state.submit_draft_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(result.into())))
}

pub async fn discard_draft(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(req): Json<DraftIdRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let cmd = DiscardDraft {
        draft_id: DraftId::from_uuid(req.draft_id),
        author_ref: user.identity_ref,
    };

    state.discard_draft_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::ok()))
}
