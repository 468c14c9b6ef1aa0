//! Repository Ports - 出站端口
//!
//! 定义播客与用户持久化的抽象接口
//! 具体实现在 infrastructure 层（SQLite）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::creator::TopCreator;

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Podcast Repository
// ============================================================================

/// 播客实体（用于持久化）
#[derive(Debug, Clone, PartialEq)]
pub struct PodcastRecord {
    pub id: Uuid,
    pub author_ref: String,
    /// 发布时作者的展示名与头像
    pub author_name: String,
    pub author_image_url: String,
    pub title: String,
    pub description: String,
    pub audio_url: String,
    pub audio_storage_id: Uuid,
    pub audio_duration_secs: f64,
    pub image_url: String,
    pub image_storage_id: Uuid,
    pub voice_type: String,
    pub voice_prompt: String,
    pub image_prompt: String,
    pub views: u64,
    pub created_at: DateTime<Utc>,
}

/// Podcast Repository Port
#[async_trait]
pub trait PodcastRepositoryPort: Send + Sync {
    /// 写入新播客
    async fn create(&self, podcast: &PodcastRecord) -> Result<(), RepositoryError>;

    /// 根据 ID 查找播客
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PodcastRecord>, RepositoryError>;

    /// 获取作者的所有播客（按创建时间倒序）
    async fn find_by_author(&self, author_ref: &str) -> Result<Vec<PodcastRecord>, RepositoryError>;
}

// ============================================================================
// User Repository
// ============================================================================

/// 用户实体（用于持久化）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: Uuid,
    /// 身份提供方给出的引用，唯一
    pub identity_ref: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// 排行记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopCreatorRecord {
    pub identity_ref: String,
    pub name: String,
    pub image_url: String,
    pub total_podcasts: u64,
}

impl From<TopCreatorRecord> for TopCreator {
    fn from(record: TopCreatorRecord) -> Self {
        Self {
            identity_ref: record.identity_ref,
            name: record.name,
            image_url: record.image_url,
            total_podcasts: record.total_podcasts,
        }
    }
}

/// User Repository Port
#[async_trait]
pub trait UserRepositoryPort: Send + Sync {
    /// 插入或按 identity_ref 更新用户
    async fn upsert(&self, user: &UserRecord) -> Result<(), RepositoryError>;

    /// 根据身份引用查找用户
    async fn find_by_identity(&self, identity_ref: &str)
        -> Result<Option<UserRecord>, RepositoryError>;

    /// 按播客数量降序排列的用户
    async fn top_by_podcast_count(&self) -> Result<Vec<TopCreatorRecord>, RepositoryError>;
}
