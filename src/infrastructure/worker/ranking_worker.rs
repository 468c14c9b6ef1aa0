//! Ranking Worker - 创作者排行快照维护
//!
//! 启动时加载一次，之后在播客发布、用户同步事件或定时器触发时重新查询。
//! 读取方通过 watch 通道拿到最新快照，None 表示首次加载尚未完成。

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};

use crate::application::ports::{RankingSnapshotPort, RepositoryError, UserRepositoryPort};
use crate::domain::creator::TopCreator;
use crate::infrastructure::events::{EventPublisher, WsEvent};

/// Worker 配置
#[derive(Debug, Clone)]
pub struct RankingWorkerConfig {
    /// 定时刷新间隔（秒），0 表示只在事件触发时刷新
    pub refresh_interval_secs: u64,
}

impl Default for RankingWorkerConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 300,
        }
    }
}

/// 基于 watch 通道的排行快照读取端
#[derive(Clone)]
pub struct WatchRankingSnapshot {
    receiver: watch::Receiver<Option<Vec<TopCreator>>>,
}

impl WatchRankingSnapshot {
    /// 订阅快照变化
    pub fn subscribe(&self) -> watch::Receiver<Option<Vec<TopCreator>>> {
        self.receiver.clone()
    }
}

impl RankingSnapshotPort for WatchRankingSnapshot {
    fn current(&self) -> Option<Vec<TopCreator>> {
        self.receiver.borrow().clone()
    }
}

/// 排行 Worker
pub struct RankingWorker {
    config: RankingWorkerConfig,
    user_repo: Arc<dyn UserRepositoryPort>,
    event_publisher: Arc<EventPublisher>,
    sender: watch::Sender<Option<Vec<TopCreator>>>,
}

impl RankingWorker {
    /// 创建 Worker 及其快照读取端
    pub fn new(
        config: RankingWorkerConfig,
        user_repo: Arc<dyn UserRepositoryPort>,
        event_publisher: Arc<EventPublisher>,
    ) -> (Self, WatchRankingSnapshot) {
        let (sender, receiver) = watch::channel(None);
        let worker = Self {
            config,
            user_repo,
            event_publisher,
            sender,
        };
        (worker, WatchRankingSnapshot { receiver })
    }

    /// 重新查询排行并发布快照
    pub async fn refresh(&self) -> Result<usize, RepositoryError> {
        let creators: Vec<TopCreator> = self
            .user_repo
            .top_by_podcast_count()
            .await?
            .into_iter()
            .map(TopCreator::from)
            .collect();

        let total = creators.len();
        self.sender.send_replace(Some(creators));
        self.event_publisher.publish_ranking_updated(total);

        tracing::debug!(total_creators = total, "Ranking snapshot refreshed");
        Ok(total)
    }

    async fn refresh_logged(&self) {
        if let Err(e) = self.refresh().await {
            // 保留上一次的快照
            tracing::error!(error = %e, "Failed to refresh ranking snapshot");
        }
    }

    /// 启动 Worker
    pub async fn run(self) {
        tracing::info!(
            refresh_interval_secs = self.config.refresh_interval_secs,
            "RankingWorker started"
        );

        // 先订阅再加载，避免漏掉加载期间的事件
        let mut events = self.event_publisher.subscribe_global();
        self.refresh_logged().await;

        let period = Duration::from_secs(self.config.refresh_interval_secs.max(1));
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        let periodic = self.config.refresh_interval_secs > 0;

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Ok(WsEvent::PodcastCreated { .. }) | Ok(WsEvent::UserUpserted { .. }) => {
                        self.refresh_logged().await;
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped = skipped, "RankingWorker lagged behind events");
                        self.refresh_logged().await;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                _ = ticker.tick(), if periodic => {
                    self.refresh_logged().await;
                }
            }
        }

        tracing::info!("RankingWorker stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{TopCreatorRecord, UserRecord};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubUsers {
        ranking: Mutex<Vec<TopCreatorRecord>>,
    }

    #[async_trait]
    impl UserRepositoryPort for StubUsers {
        async fn upsert(&self, _user: &UserRecord) -> Result<(), RepositoryError> {
            Ok(())
        }

        async fn find_by_identity(
            &self,
            _identity_ref: &str,
        ) -> Result<Option<UserRecord>, RepositoryError> {
            Ok(None)
        }

        async fn top_by_podcast_count(&self) -> Result<Vec<TopCreatorRecord>, RepositoryError> {
            Ok(self.ranking.lock().unwrap().clone())
        }
    }

    fn record(identity_ref: &str, total: u64) -> TopCreatorRecord {
        TopCreatorRecord {
            identity_ref: identity_ref.to_string(),
            name: identity_ref.to_uppercase(),
            image_url: String::new(),
            total_podcasts: total,
        }
    }

    #[tokio::test]
    async fn test_snapshot_is_loading_until_first_refresh() {
        let users = Arc::new(StubUsers::default());
        users.ranking.lock().unwrap().push(record("u1", 2));
        let (worker, snapshot) =
            RankingWorker::new(RankingWorkerConfig::default(), users, EventPublisher::new().arc());

        assert!(snapshot.current().is_none());

        assert_eq!(worker.refresh().await.unwrap(), 1);
        let current = snapshot.current().unwrap();
        assert_eq!(current[0].identity_ref, "u1");
        assert_eq!(current[0].total_podcasts, 2);
    }

    #[tokio::test]
    async fn test_refreshes_on_podcast_created() {
        let users = Arc::new(StubUsers::default());
        let publisher = EventPublisher::new().arc();
        let config = RankingWorkerConfig {
            refresh_interval_secs: 0,
        };
        let (worker, snapshot) = RankingWorker::new(config, users.clone(), publisher.clone());
        let mut changes = snapshot.subscribe();

        let handle = tokio::spawn(worker.run());

        // 首次加载
        changes.changed().await.unwrap();
        assert_eq!(snapshot.current(), Some(Vec::new()));

        users.ranking.lock().unwrap().push(record("u2", 1));
        publisher.publish_podcast_created(uuid::Uuid::new_v4(), "u2", "ep");

        tokio::time::timeout(Duration::from_secs(2), changes.changed())
            .await
            .unwrap()
            .unwrap();
        let current = snapshot.current().unwrap();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].identity_ref, "u2");

        handle.abort();
    }
}
