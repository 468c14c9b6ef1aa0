//! Podcast Context - Value Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 标题/描述的最小字符数
pub const MIN_TEXT_LEN: usize = 2;

/// 播客唯一标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PodcastId(Uuid);

impl PodcastId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PodcastId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PodcastId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 草稿唯一标识（仅在编辑期间存在）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DraftId(Uuid);

impl DraftId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DraftId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DraftId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 存储句柄 - 指向 blob 存储中的对象，与其 URL 相互独立
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StorageId(Uuid);

impl StorageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for StorageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StorageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 播客标题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodcastTitle(String);

impl PodcastTitle {
    pub fn new(title: impl Into<String>) -> Result<Self, &'static str> {
        let title = title.into();
        if title.chars().count() < MIN_TEXT_LEN {
            return Err("标题至少需要2个字符");
        }
        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for PodcastTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 播客描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodcastDescription(String);

impl PodcastDescription {
    pub fn new(description: impl Into<String>) -> Result<Self, &'static str> {
        let description = description.into();
        if description.chars().count() < MIN_TEXT_LEN {
            return Err("描述至少需要2个字符");
        }
        Ok(Self(description))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// 合成音色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceType {
    Alloy,
    Shimmer,
    Nova,
    Echo,
    Fable,
    Onyx,
}

impl VoiceType {
    /// 下拉选项的展示顺序
    pub const ALL: [VoiceType; 6] = [
        VoiceType::Alloy,
        VoiceType::Shimmer,
        VoiceType::Nova,
        VoiceType::Echo,
        VoiceType::Fable,
        VoiceType::Onyx,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VoiceType::Alloy => "alloy",
            VoiceType::Shimmer => "shimmer",
            VoiceType::Nova => "nova",
            VoiceType::Echo => "echo",
            VoiceType::Fable => "fable",
            VoiceType::Onyx => "onyx",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "alloy" => Some(VoiceType::Alloy),
            "shimmer" => Some(VoiceType::Shimmer),
            "nova" => Some(VoiceType::Nova),
            "echo" => Some(VoiceType::Echo),
            "fable" => Some(VoiceType::Fable),
            "onyx" => Some(VoiceType::Onyx),
            _ => None,
        }
    }

    /// 试听样本文件名，以音色命名
    pub fn preview_file_name(&self, extension: &str) -> String {
        format!("{}.{}", self.as_str(), extension)
    }

    /// 试听样本的访问路径
    pub fn preview_url(&self) -> String {
        format!("/api/voice/preview/{}", self.as_str())
    }
}

impl std::fmt::Display for VoiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 生成的旁白音频
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedAudio {
    pub url: String,
    pub storage_id: StorageId,
    pub duration_secs: f64,
}

/// 生成的封面图
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub url: String,
    pub storage_id: StorageId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_min_length() {
        assert!(PodcastTitle::new("a").is_err());
        assert!(PodcastTitle::new("").is_err());
        assert_eq!(PodcastTitle::new("My Pod").unwrap().as_str(), "My Pod");
        // 按字符计数
        assert!(PodcastTitle::new("播客").is_ok());
    }

    #[test]
    fn test_voice_type_parsing() {
        for voice in VoiceType::ALL {
            assert_eq!(VoiceType::from_str(voice.as_str()), Some(voice));
        }
        assert_eq!(VoiceType::from_str("NOVA"), None);
        assert_eq!(VoiceType::Nova.preview_file_name("mp3"), "nova.mp3");
        assert_eq!(VoiceType::Echo.preview_url(), "/api/voice/preview/echo");
    }
}
