//! Podcast Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{
    DraftError, DraftId, GeneratedAudio, GeneratedImage, PodcastDescription, PodcastDraft,
    PodcastId, PodcastTitle, VoiceType,
};
use crate::domain::Navigation;

/// 提交按钮的默认文案
pub const SUBMIT_LABEL: &str = "Submit & Publish Podcast";
/// 提交中的按钮文案
pub const SUBMITTING_LABEL: &str = "Submitting";

/// 提交状态机
///
/// Idle -> Submitting -> (PersistedRedirecting | Idle)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionState {
    Idle,
    Submitting,
    PersistedRedirecting { podcast_id: PodcastId },
}

impl SubmissionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Submitting => "submitting",
            SubmissionState::PersistedRedirecting { .. } => "persisted_redirecting",
        }
    }
}

/// 持久化请求，由通过校验的草稿构造
#[derive(Debug, Clone, PartialEq)]
pub struct NewPodcast {
    pub author_ref: String,
    pub title: PodcastTitle,
    pub description: PodcastDescription,
    pub audio: GeneratedAudio,
    pub image: GeneratedImage,
    pub voice_type: VoiceType,
    pub voice_prompt: String,
    pub image_prompt: String,
    pub views: u64,
}

/// 创建表单聚合根
///
/// 不变量:
/// - 只有 Idle 状态允许编辑字段和接收生成结果
/// - 进入 Submitting 前必须通过字段校验，且音频、封面、音色均已就绪
/// - 同一时刻最多一个未完成的持久化请求
#[derive(Debug, Clone)]
pub struct CreationForm {
    id: DraftId,
    author_ref: String,
    draft: PodcastDraft,
    state: SubmissionState,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CreationForm {
    /// 为指定作者创建空表单
    pub fn new(author_ref: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: DraftId::new(),
            author_ref: author_ref.into(),
            draft: PodcastDraft::default(),
            state: SubmissionState::Idle,
            created_at: now,
            updated_at: now,
        }
    }

    fn ensure_editable(&self) -> Result<(), DraftError> {
        match self.state {
            SubmissionState::Idle => Ok(()),
            SubmissionState::Submitting => Err(DraftError::AlreadySubmitting),
            SubmissionState::PersistedRedirecting { .. } => Err(DraftError::AlreadyPublished),
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), DraftError> {
        self.ensure_editable()?;
        self.draft.title = title.into();
        self.touch();
        Ok(())
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> Result<(), DraftError> {
        self.ensure_editable()?;
        self.draft.description = description.into();
        self.touch();
        Ok(())
    }

    pub fn set_voice_prompt(&mut self, prompt: impl Into<String>) -> Result<(), DraftError> {
        self.ensure_editable()?;
        self.draft.voice_prompt = prompt.into();
        self.touch();
        Ok(())
    }

    pub fn set_image_prompt(&mut self, prompt: impl Into<String>) -> Result<(), DraftError> {
        self.ensure_editable()?;
        self.draft.image_prompt = prompt.into();
        self.touch();
        Ok(())
    }

    /// 选择音色（单选，覆盖之前的选择）
    pub fn select_voice(&mut self, voice_type: VoiceType) -> Result<(), DraftError> {
        self.ensure_editable()?;
        self.draft.voice_type = Some(voice_type);
        self.touch();
        Ok(())
    }

    /// 生成音频所需的参数
    pub fn audio_request(&self) -> Result<(VoiceType, String), DraftError> {
        self.ensure_editable()?;
        let voice_type = self.draft.voice_type.ok_or(DraftError::VoiceNotSelected)?;
        if self.draft.voice_prompt.trim().is_empty() {
            return Err(DraftError::MissingPrompt("voice_prompt"));
        }
        Ok((voice_type, self.draft.voice_prompt.clone()))
    }

    /// 生成封面所需的提示词
    pub fn image_request(&self) -> Result<String, DraftError> {
        self.ensure_editable()?;
        if self.draft.image_prompt.trim().is_empty() {
            return Err(DraftError::MissingPrompt("image_prompt"));
        }
        Ok(self.draft.image_prompt.clone())
    }

    /// 记录音频生成结果，返回被替换的旧音频
    pub fn apply_audio(&mut self, audio: GeneratedAudio) -> Result<Option<GeneratedAudio>, DraftError> {
        self.ensure_editable()?;
        let replaced = self.draft.audio.replace(audio);
        self.touch();
        Ok(replaced)
    }

    /// 记录封面生成结果，返回被替换的旧封面
    pub fn apply_image(&mut self, image: GeneratedImage) -> Result<Option<GeneratedImage>, DraftError> {
        self.ensure_editable()?;
        let replaced = self.draft.image.replace(image);
        self.touch();
        Ok(replaced)
    }

    /// Idle -> Submitting
    ///
    /// 校验失败时状态保持 Idle
    pub fn begin_submit(&mut self) -> Result<NewPodcast, DraftError> {
        self.ensure_editable()?;

        let (title, description) = self.draft.validate_fields()?;

        let (audio, image, voice_type) = match (
            self.draft.audio.clone(),
            self.draft.image.clone(),
            self.draft.voice_type,
        ) {
            (Some(audio), Some(image), Some(voice_type))
                if !audio.url.is_empty() && !image.url.is_empty() =>
            {
                (audio, image, voice_type)
            }
            _ => {
                return Err(DraftError::MissingAssets {
                    missing: self.draft.missing_assets(),
                })
            }
        };

        self.state = SubmissionState::Submitting;
        self.touch();

        Ok(NewPodcast {
            author_ref: self.author_ref.clone(),
            title,
            description,
            audio,
            image,
            voice_type,
            voice_prompt: self.draft.voice_prompt.clone(),
            image_prompt: self.draft.image_prompt.clone(),
            views: 0,
        })
    }

    /// Submitting -> PersistedRedirecting
    pub fn complete_submit(&mut self, podcast_id: PodcastId) -> Result<Navigation, DraftError> {
        if self.state != SubmissionState::Submitting {
            return Err(DraftError::InvalidTransition("complete_submit"));
        }
        self.state = SubmissionState::PersistedRedirecting { podcast_id };
        self.touch();
        Ok(Navigation::Home)
    }

    /// Submitting -> Idle，字段保持不变
    pub fn fail_submit(&mut self) -> Result<(), DraftError> {
        if self.state != SubmissionState::Submitting {
            return Err(DraftError::InvalidTransition("fail_submit"));
        }
        self.state = SubmissionState::Idle;
        self.touch();
        Ok(())
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    /// 提交按钮是否可用
    pub fn can_submit(&self) -> bool {
        self.state == SubmissionState::Idle && self.draft.has_required_assets()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    // Getters
    pub fn id(&self) -> &DraftId {
        &self.id
    }

    pub fn author_ref(&self) -> &str {
        &self.author_ref
    }

    pub fn draft(&self) -> &PodcastDraft {
        &self.draft
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
