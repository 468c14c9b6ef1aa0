//! Draft Command Handlers

use std::sync::Arc;

use crate::application::commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{BlobStoragePort, DraftFieldsPatch, DraftManagerPort};
use crate::application::queries::handlers::{load_owned_draft, DraftResponse};
use crate::domain::podcast::{CreationForm, VoiceType};
use crate::infrastructure::events::EventPublisher;

/// 选择音色响应
#[derive(Debug, Clone)]
pub struct SelectVoiceResponse {
    pub voice_type: VoiceType,
    /// 试听地址
    pub preview_url: String,
}

/// CreateDraft Handler
pub struct CreateDraftHandler {
    draft_manager: Arc<dyn DraftManagerPort>,
}

impl CreateDraftHandler {
    pub fn new(draft_manager: Arc<dyn DraftManagerPort>) -> Self {
        Self { draft_manager }
    }

    pub fn handle(&self, cmd: CreateDraft) -> Result<DraftResponse, ApplicationError> {
        if cmd.author_ref.trim().is_empty() {
            return Err(ApplicationError::validation("author_ref is required"));
        }

        let form = CreationForm::new(cmd.author_ref);
        let snapshot = form.clone();
        self.draft_manager.create(form)?;

        Ok(DraftResponse::from(snapshot))
    }
}

/// UpdateDraftFields Handler
pub struct UpdateDraftFieldsHandler {
    draft_manager: Arc<dyn DraftManagerPort>,
}

impl UpdateDraftFieldsHandler {
    pub fn new(draft_manager: Arc<dyn DraftManagerPort>) -> Self {
        Self { draft_manager }
    }

    pub fn handle(&self, cmd: UpdateDraftFields) -> Result<DraftResponse, ApplicationError> {
        load_owned_draft(self.draft_manager.as_ref(), &cmd.draft_id, &cmd.author_ref)?;

        let patch = DraftFieldsPatch {
            title: cmd.title,
            description: cmd.description,
            voice_prompt: cmd.voice_prompt,
            image_prompt: cmd.image_prompt,
        };
        let form = self.draft_manager.update_fields(&cmd.draft_id, patch)?;

        Ok(DraftResponse::from(form))
    }
}

/// SelectVoice Handler
///
/// 单选：新选择覆盖旧选择，并返回对应的试听地址
pub struct SelectVoiceHandler {
    draft_manager: Arc<dyn DraftManagerPort>,
}

impl SelectVoiceHandler {
    pub fn new(draft_manager: Arc<dyn DraftManagerPort>) -> Self {
        Self { draft_manager }
    }

    pub fn handle(&self, cmd: SelectVoice) -> Result<SelectVoiceResponse, ApplicationError> {
        load_owned_draft(self.draft_manager.as_ref(), &cmd.draft_id, &cmd.author_ref)?;
        self.draft_manager.select_voice(&cmd.draft_id, cmd.voice_type)?;

        Ok(SelectVoiceResponse {
            voice_type: cmd.voice_type,
            preview_url: cmd.voice_type.preview_url(),
        })
    }
}

/// DiscardDraft Handler
///
/// 未发布的草稿被放弃时，已生成的音频与封面一并删除
pub struct DiscardDraftHandler {
    draft_manager: Arc<dyn DraftManagerPort>,
    blob_storage: Arc<dyn BlobStoragePort>,
    event_publisher: Arc<EventPublisher>,
}

impl DiscardDraftHandler {
    pub fn new(
        draft_manager: Arc<dyn DraftManagerPort>,
        blob_storage: Arc<dyn BlobStoragePort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            draft_manager,
            blob_storage,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: DiscardDraft) -> Result<(), ApplicationError> {
        load_owned_draft(self.draft_manager.as_ref(), &cmd.draft_id, &cmd.author_ref)?;

        // 提交中的草稿不会被移除
        let form = self.draft_manager.remove_if_idle(&cmd.draft_id)?;
        self.event_publisher.unregister_draft(cmd.draft_id);

        let draft = form.draft();
        let storage_ids = draft
            .audio
            .iter()
            .map(|a| a.storage_id)
            .chain(draft.image.iter().map(|i| i.storage_id));
        for storage_id in storage_ids {
            if let Err(e) = self.blob_storage.delete(storage_id).await {
                tracing::warn!(storage_id = %storage_id, error = %e, "Failed to delete draft blob");
            }
        }

        tracing::info!(draft_id = %cmd.draft_id, "Draft discarded");
        Ok(())
    }
}
