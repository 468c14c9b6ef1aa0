//! Ranking Queries

/// 获取侧边栏排行面板
#[derive(Debug, Clone, Default)]
pub struct GetTopCreators {
    /// 已登录访问者的身份引用，用于面板顶部的个人入口
    pub viewer_ref: Option<String>,
}
