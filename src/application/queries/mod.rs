//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：处理所有读操作

mod draft_queries;
mod podcast_queries;
mod ranking_queries;
mod voice_queries;

pub mod handlers;

pub use draft_queries::*;
pub use podcast_queries::*;
pub use ranking_queries::*;
pub use voice_queries::*;
