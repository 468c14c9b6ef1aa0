//! Worker Layer - Background Task Processing
//!
//! - RankingWorker: 维护创作者排行快照
//! - DraftGcWorker: 回收长时间未更新的草稿

mod draft_gc;
mod ranking_worker;

pub use draft_gc::{DraftGcConfig, DraftGcWorker};
pub use ranking_worker::{RankingWorker, RankingWorkerConfig, WatchRankingSnapshot};
