//! 客户端导航目标

use serde::Serialize;

/// 操作完成后客户端应跳转的位置
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "route", content = "identity_ref", rename_all = "snake_case")]
pub enum Navigation {
    /// 应用首页
    Home,
    /// 创作者主页，以身份引用为键
    Profile(String),
}

impl Navigation {
    pub fn path(&self) -> String {
        match self {
            Navigation::Home => "/".to_string(),
            Navigation::Profile(identity_ref) => format!("/profile/{}", identity_ref),
        }
    }
}
