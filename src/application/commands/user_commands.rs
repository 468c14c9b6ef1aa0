//! User Commands

/// 写入或更新用户（身份提供方同步）
#[derive(Debug, Clone)]
pub struct UpsertUser {
    pub identity_ref: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
}
