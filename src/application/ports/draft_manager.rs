//! Draft Manager Port - 草稿生命周期管理
//!
//! 定义草稿管理的抽象接口，具体实现在 infrastructure/memory 层。
//! 每个方法对单个草稿的修改是原子的。

use thiserror::Error;

use crate::domain::podcast::{
    CreationForm, DraftError, DraftId, GeneratedAudio, GeneratedImage, NewPodcast, PodcastId,
    VoiceType,
};
use crate::domain::Navigation;

/// Draft Manager 错误
#[derive(Debug, Error)]
pub enum DraftStoreError {
    #[error("Draft not found: {0}")]
    NotFound(DraftId),

    #[error("Draft already exists: {0}")]
    AlreadyExists(DraftId),

    #[error(transparent)]
    Rejected(#[from] DraftError),
}

/// 字段的部分更新，None 表示保持不变
#[derive(Debug, Clone, Default)]
pub struct DraftFieldsPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub voice_prompt: Option<String>,
    pub image_prompt: Option<String>,
}

/// Draft Manager Port
///
/// 管理创建表单的生命周期，所有状态存储在内存中
pub trait DraftManagerPort: Send + Sync {
    /// 保存新表单
    fn create(&self, form: CreationForm) -> Result<DraftId, DraftStoreError>;

    /// 获取表单快照
    fn get(&self, id: &DraftId) -> Result<CreationForm, DraftStoreError>;

    /// 更新字段
    fn update_fields(&self, id: &DraftId, patch: DraftFieldsPatch) -> Result<CreationForm, DraftStoreError>;

    /// 选择音色
    fn select_voice(&self, id: &DraftId, voice_type: VoiceType) -> Result<(), DraftStoreError>;

    /// 写入音频生成结果，返回被替换的旧音频
    fn apply_audio(
        &self,
        id: &DraftId,
        audio: GeneratedAudio,
    ) -> Result<Option<GeneratedAudio>, DraftStoreError>;

    /// 写入封面生成结果，返回被替换的旧封面
    fn apply_image(
        &self,
        id: &DraftId,
        image: GeneratedImage,
    ) -> Result<Option<GeneratedImage>, DraftStoreError>;

    /// Idle -> Submitting
    fn begin_submit(&self, id: &DraftId) -> Result<NewPodcast, DraftStoreError>;

    /// Submitting -> PersistedRedirecting
    fn complete_submit(&self, id: &DraftId, podcast_id: PodcastId) -> Result<Navigation, DraftStoreError>;

    /// Submitting -> Idle
    fn fail_submit(&self, id: &DraftId) -> Result<(), DraftStoreError>;

    /// 移除表单
    fn remove(&self, id: &DraftId) -> Result<(), DraftStoreError>;

    /// 仅当表单不在提交中时移除，检查与移除在同一把锁内完成
    fn remove_if_idle(&self, id: &DraftId) -> Result<CreationForm, DraftStoreError>;

    /// 超过指定秒数未更新的草稿
    fn get_stale_drafts(&self, idle_timeout_secs: u64) -> Vec<DraftId>;
}
