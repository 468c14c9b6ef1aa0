//! Podcast Context - Errors

use thiserror::Error;

/// 提交前素材缺失时展示的提示
pub const MISSING_ASSETS_NOTICE: &str = "Please generate audio and image";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("无效的标题: {0}")]
    InvalidTitle(String),

    #[error("无效的描述: {0}")]
    InvalidDescription(String),

    /// 音频、封面或音色未就绪
    #[error("Please generate audio and image")]
    MissingAssets { missing: Vec<&'static str> },

    #[error("缺少提示词: {0}")]
    MissingPrompt(&'static str),

    #[error("尚未选择音色")]
    VoiceNotSelected,

    #[error("正在提交中")]
    AlreadySubmitting,

    #[error("草稿已发布")]
    AlreadyPublished,

    #[error("当前状态不允许该操作: {0}")]
    InvalidTransition(&'static str),
}
