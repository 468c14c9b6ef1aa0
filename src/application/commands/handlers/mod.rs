//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod draft_handlers;
mod generation_handlers;
mod submit_handlers;
mod user_handlers;

pub use draft_handlers::*;
pub use generation_handlers::*;
pub use submit_handlers::*;
pub use user_handlers::*;
