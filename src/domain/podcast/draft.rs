//! Podcast Context - 草稿实体

use serde::{Deserialize, Serialize};

use super::{
    DraftError, GeneratedAudio, GeneratedImage, PodcastDescription, PodcastTitle, VoiceType,
};

/// 编辑中的播客草稿
///
/// 只存在于内存中，提交成功后才成为持久化的 PodcastRecord
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PodcastDraft {
    pub title: String,
    pub description: String,
    pub voice_type: Option<VoiceType>,
    pub voice_prompt: String,
    pub image_prompt: String,
    pub audio: Option<GeneratedAudio>,
    pub image: Option<GeneratedImage>,
}

impl PodcastDraft {
    /// 同步校验标题与描述
    pub fn validate_fields(&self) -> Result<(PodcastTitle, PodcastDescription), DraftError> {
        let title = PodcastTitle::new(self.title.clone())
            .map_err(|e| DraftError::InvalidTitle(e.to_string()))?;
        let description = PodcastDescription::new(self.description.clone())
            .map_err(|e| DraftError::InvalidDescription(e.to_string()))?;
        Ok((title, description))
    }

    /// 尚未就绪的生成素材（音频、封面、音色）
    pub fn missing_assets(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.audio.as_ref().map_or(true, |a| a.url.is_empty()) {
            missing.push("audio");
        }
        if self.image.as_ref().map_or(true, |i| i.url.is_empty()) {
            missing.push("image");
        }
        if self.voice_type.is_none() {
            missing.push("voice_type");
        }
        missing
    }

    pub fn has_required_assets(&self) -> bool {
        self.missing_assets().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::podcast::StorageId;

    #[test]
    fn test_validate_fields() {
        let mut draft = PodcastDraft {
            title: "My Pod".to_string(),
            description: "d".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            draft.validate_fields(),
            Err(DraftError::InvalidDescription(_))
        ));

        draft.description = "desc".to_string();
        let (title, description) = draft.validate_fields().unwrap();
        assert_eq!(title.as_str(), "My Pod");
        assert_eq!(description.as_str(), "desc");
    }

    #[test]
    fn test_missing_assets() {
        let mut draft = PodcastDraft::default();
        assert_eq!(draft.missing_assets(), vec!["audio", "image", "voice_type"]);

        draft.audio = Some(GeneratedAudio {
            url: String::new(),
            storage_id: StorageId::new(),
            duration_secs: 1.0,
        });
        // 空 URL 视为未生成
        assert!(draft.missing_assets().contains(&"audio"));

        draft.voice_type = Some(VoiceType::Onyx);
        assert_eq!(draft.missing_assets(), vec!["audio", "image"]);
    }
}
