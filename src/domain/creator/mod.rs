//! Creator Context - 创作者排行限界上下文
//!
//! 职责:
//! - 排行条目
//! - 侧边栏面板视图（加载占位、轮播、前三名）

mod panel;

pub use panel::{PanelView, PanelViewer, TopCreator, TOP_PODCASTS_LIMIT};
