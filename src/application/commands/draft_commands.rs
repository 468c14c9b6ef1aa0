//! Draft Commands

use crate::domain::podcast::{DraftId, VoiceType};

/// 创建空草稿
#[derive(Debug, Clone)]
pub struct CreateDraft {
    pub author_ref: String,
}

/// 更新草稿字段（部分更新）
#[derive(Debug, Clone)]
pub struct UpdateDraftFields {
    pub draft_id: DraftId,
    pub author_ref: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub voice_prompt: Option<String>,
    pub image_prompt: Option<String>,
}

/// 选择音色
#[derive(Debug, Clone)]
pub struct SelectVoice {
    pub draft_id: DraftId,
    pub author_ref: String,
    pub voice_type: VoiceType,
}

/// 生成旁白音频，可同时更新提示词
#[derive(Debug, Clone)]
pub struct GenerateAudio {
    pub draft_id: DraftId,
    pub author_ref: String,
    pub voice_prompt: Option<String>,
}

/// 生成封面，可同时更新提示词
#[derive(Debug, Clone)]
pub struct GenerateThumbnail {
    pub draft_id: DraftId,
    pub author_ref: String,
    pub image_prompt: Option<String>,
}

/// 提交并发布
#[derive(Debug, Clone)]
pub struct SubmitDraft {
    pub draft_id: DraftId,
    pub author_ref: String,
}

/// 放弃草稿
#[derive(Debug, Clone)]
pub struct DiscardDraft {
    pub draft_id: DraftId,
    pub author_ref: String,
}
