//! Podcast Queries

use uuid::Uuid;

/// 获取播客详情
#[derive(Debug, Clone)]
pub struct GetPodcast {
    pub podcast_id: Uuid,
}

/// 获取创作者主页（用户信息 + 播客列表）
#[derive(Debug, Clone)]
pub struct GetCreatorProfile {
    pub identity_ref: String,
}
