//! Ranking Snapshot Port
//!
//! 排行查询结果的订阅快照。首次计算完成前为 None。

use crate::domain::creator::TopCreator;

pub trait RankingSnapshotPort: Send + Sync {
    fn current(&self) -> Option<Vec<TopCreator>>;
}
