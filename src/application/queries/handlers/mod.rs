//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod draft_handlers;
mod podcast_handlers;
mod ranking_handlers;
mod voice_handlers;

pub use draft_handlers::*;
pub use podcast_handlers::*;
pub use ranking_handlers::*;
pub use voice_handlers::*;
