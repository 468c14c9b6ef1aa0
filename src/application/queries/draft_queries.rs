//! Draft Queries

use crate::domain::podcast::DraftId;

/// 获取草稿快照
#[derive(Debug, Clone)]
pub struct GetDraft {
    pub draft_id: DraftId,
    pub author_ref: String,
}
