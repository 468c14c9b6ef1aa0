//! Podcast Context - 播客创作限界上下文
//!
//! 职责:
//! - 草稿字段与校验
//! - 提交状态机
//! - 持久化请求的构造

mod aggregate;
mod draft;
mod errors;
mod value_objects;

pub use aggregate::{CreationForm, NewPodcast, SubmissionState, SUBMITTING_LABEL, SUBMIT_LABEL};
pub use draft::PodcastDraft;
pub use errors::{DraftError, MISSING_ASSETS_NOTICE};
pub use value_objects::{
    DraftId, GeneratedAudio, GeneratedImage, PodcastDescription, PodcastId, PodcastTitle,
    StorageId, VoiceType, MIN_TEXT_LEN,
};
