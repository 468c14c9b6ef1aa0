//! In-Memory Implementations
//!
//! 草稿状态只存在于内存中

mod draft_manager;

pub use draft_manager::InMemoryDraftManager;
