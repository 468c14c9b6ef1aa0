//! Draft GC Worker - 回收闲置草稿
//!
//! 提交中的草稿不会被回收。被回收草稿已生成的音频与封面一并删除。

use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{BlobStoragePort, DraftManagerPort};
use crate::infrastructure::events::EventPublisher;

/// GC 配置
#[derive(Debug, Clone)]
pub struct DraftGcConfig {
    /// 扫描间隔（秒）
    pub interval_secs: u64,
    /// 草稿闲置多久后回收（秒）
    pub draft_expire_secs: u64,
}

impl Default for DraftGcConfig {
    fn default() -> Self {
        Self {
            interval_secs: 600,
            draft_expire_secs: 86400,
        }
    }
}

/// 草稿回收 Worker
pub struct DraftGcWorker {
    config: DraftGcConfig,
    draft_manager: Arc<dyn DraftManagerPort>,
    blob_storage: Arc<dyn BlobStoragePort>,
    event_publisher: Arc<EventPublisher>,
}

impl DraftGcWorker {
    pub fn new(
        config: DraftGcConfig,
        draft_manager: Arc<dyn DraftManagerPort>,
        blob_storage: Arc<dyn BlobStoragePort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            config,
            draft_manager,
            blob_storage,
            event_publisher,
        }
    }

    /// 执行一次回收，返回回收的草稿数
    pub async fn sweep(&self) -> usize {
        let stale = self
            .draft_manager
            .get_stale_drafts(self.config.draft_expire_secs);

        let mut removed = 0;
        for draft_id in stale {
            // 扫描与删除之间可能已进入提交
            let form = match self.draft_manager.remove_if_idle(&draft_id) {
                Ok(form) => form,
                Err(e) => {
                    tracing::debug!(draft_id = %draft_id, error = %e, "Stale draft skipped");
                    continue;
                }
            };
            self.event_publisher.unregister_draft(draft_id);

            let draft = form.draft();
            let storage_ids = draft
                .audio
                .iter()
                .map(|a| a.storage_id)
                .chain(draft.image.iter().map(|i| i.storage_id));
            for storage_id in storage_ids {
                if let Err(e) = self.blob_storage.delete(storage_id).await {
                    tracing::warn!(storage_id = %storage_id, error = %e, "Failed to delete stale draft blob");
                }
            }
            removed += 1;
        }

        if removed > 0 {
            tracing::info!(removed = removed, "Stale drafts collected");
        }
        removed
    }

    /// 启动 Worker
    pub async fn run(self) {
        tracing::info!(
            interval_secs = self.config.interval_secs,
            draft_expire_secs = self.config.draft_expire_secs,
            "DraftGcWorker started"
        );

        let mut ticker = tokio::time::interval(Duration::from_secs(self.config.interval_secs.max(1)));
        // 第一次 tick 立即完成
        ticker.tick().await;

        loop {
            ticker.tick().await;
            self.sweep().await;
        }
    }
}
