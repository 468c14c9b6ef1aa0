//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Podcast Context: 播客草稿与提交
//! - Creator Context: 创作者排行

pub mod creator;
pub mod podcast;

mod navigation;

pub use navigation::Navigation;
