//! Draft Query Handlers

use std::sync::Arc;
use uuid::Uuid;

use crate::application::error::ApplicationError;
use crate::application::ports::DraftManagerPort;
use crate::application::queries::GetDraft;
use crate::domain::podcast::{CreationForm, DraftId};

// ============================================================================
// Response DTOs
// ============================================================================

/// 草稿快照响应
#[derive(Debug, Clone)]
pub struct DraftResponse {
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

impl From<CreationForm> for DraftResponse {
    fn from(form: CreationForm) -> Self {
        let draft = form.draft();
        Self {
            id: *form.id().as_uuid(),
            author_ref: form.author_ref().to_string(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            voice_type: draft.voice_type.map(|v| v.as_str().to_string()),
            voice_prompt: draft.voice_prompt.clone(),
            image_prompt: draft.image_prompt.clone(),
            audio_url: draft.audio.as_ref().map(|a| a.url.clone()),
            audio_storage_id: draft.audio.as_ref().map(|a| *a.storage_id.as_uuid()),
            audio_duration_secs: draft.audio.as_ref().map(|a| a.duration_secs),
            image_url: draft.image.as_ref().map(|i| i.url.clone()),
            image_storage_id: draft.image.as_ref().map(|i| *i.storage_id.as_uuid()),
            state: form.state().as_str().to_string(),
            is_submitting: form.is_submitting(),
            can_submit: form.can_submit(),
            submit_label: form.submit_label().to_string(),
            missing_assets: draft
                .missing_assets()
                .into_iter()
                .map(str::to_string)
                .collect(),
            updated_at: form.updated_at().to_rfc3339(),
        }
    }
}

/// 读取草稿并校验归属，非作者视为不存在
pub(crate) fn load_owned_draft(
    draft_manager: &dyn DraftManagerPort,
    draft_id: &DraftId,
    author_ref: &str,
) -> Result<CreationForm, ApplicationError> {
    let form = draft_manager.get(draft_id)?;
    if form.author_ref() != author_ref {
        tracing::warn!(
            draft_id = %draft_id,
            author_ref = %author_ref,
            "Draft access denied for non-author"
        );
        return Err(ApplicationError::not_found("Draft", *draft_id.as_uuid()));
    }
    Ok(form)
}

// ============================================================================
// Handlers
// ============================================================================

/// GetDraft Handler
pub struct GetDraftHandler {
    draft_manager: Arc<dyn DraftManagerPort>,
}

impl GetDraftHandler {
    pub fn new(draft_manager: Arc<dyn DraftManagerPort>) -> Self {
        Self { draft_manager }
    }

    pub fn handle(&self, query: GetDraft) -> Result<DraftResponse, ApplicationError> {
        let form = load_owned_draft(self.draft_manager.as_ref(), &query.draft_id, &query.author_ref)?;
        Ok(DraftResponse::from(form))
    }
}
