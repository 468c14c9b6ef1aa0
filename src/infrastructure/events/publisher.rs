//! Event Publisher Implementation
//!
//! WebSocket 事件推送实现

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::domain::podcast::DraftId;

/// 提示样式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeVariant {
    Default,
    Destructive,
}

/// WebSocket 事件类型
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum WsEvent {
    /// 面向草稿作者的提示
    Notice {
        draft_id: Uuid,
        title: String,
        variant: NoticeVariant,
    },
    /// 播客发布完成
    PodcastCreated {
        podcast_id: Uuid,
        author_ref: String,
        title: String,
    },
    /// 用户信息同步
    UserUpserted {
        identity_ref: String,
    },
    /// 排行快照已刷新
    RankingUpdated {
        total_creators: usize,
    },
}

/// 事件发布器
pub struct EventPublisher {
    /// draft_id -> broadcast sender (草稿提示)
    draft_channels: DashMap<DraftId, broadcast::Sender<WsEvent>>,
    /// 全局广播（发布、用户、排行事件）
    global_channel: broadcast::Sender<WsEvent>,
}

impl EventPublisher {
    pub fn new() -> Self {
        let (global_tx, _) = broadcast::channel(100);
        Self {
            draft_channels: DashMap::new(),
            global_channel: global_tx,
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 订阅全局事件
    pub fn subscribe_global(&self) -> broadcast::Receiver<WsEvent> {
        self.global_channel.subscribe()
    }

    /// 注册草稿的事件通道
    pub fn register_draft(&self, draft_id: DraftId) -> broadcast::Receiver<WsEvent> {
        self.draft_channels
            .entry(draft_id)
            .or_insert_with(|| broadcast::channel(32).0)
            .subscribe()
    }

    /// 取消注册草稿，已缓冲的事件仍会送达
    pub fn unregister_draft(&self, draft_id: DraftId) {
        self.draft_channels.remove(&draft_id);
    }

    /// 最后一个订阅者断开后移除通道
    pub fn release_draft(&self, draft_id: DraftId) {
        self.draft_channels
            .remove_if(&draft_id, |_, sender| sender.receiver_count() == 0);
    }

    /// 发布普通提示
    pub fn publish_notice(&self, draft_id: DraftId, title: &str) {
        self.publish_to_draft(
            draft_id,
            WsEvent::Notice {
                draft_id: *draft_id.as_uuid(),
                title: title.to_string(),
                variant: NoticeVariant::Default,
            },
        );
    }

    /// 发布错误提示
    pub fn publish_error_notice(&self, draft_id: DraftId, title: &str) {
        self.publish_to_draft(
            draft_id,
            WsEvent::Notice {
                draft_id: *draft_id.as_uuid(),
                title: title.to_string(),
                variant: NoticeVariant::Destructive,
            },
        );
    }

    /// 发布播客创建事件（全局广播）
    pub fn publish_podcast_created(&self, podcast_id: Uuid, author_ref: &str, title: &str) {
        self.publish_global(WsEvent::PodcastCreated {
            podcast_id,
            author_ref: author_ref.to_string(),
            title: title.to_string(),
        });
    }

    /// 发布用户同步事件（全局广播）
    pub fn publish_user_upserted(&self, identity_ref: &str) {
        self.publish_global(WsEvent::UserUpserted {
            identity_ref: identity_ref.to_string(),
        });
    }

    /// 发布排行刷新事件（全局广播）
    pub fn publish_ranking_updated(&self, total_creators: usize) {
        self.publish_global(WsEvent::RankingUpdated { total_creators });
    }

    fn publish_global(&self, event: WsEvent) {
        if let Err(e) = self.global_channel.send(event) {
            tracing::debug!(error = %e, "Failed to publish global event (no receivers)");
        }
    }

    /// 发布事件到指定草稿
    fn publish_to_draft(&self, draft_id: DraftId, event: WsEvent) {
        if let Some(sender) = self.draft_channels.get(&draft_id) {
            if let Err(e) = sender.send(event) {
                tracing::debug!(
                    draft_id = %draft_id,
                    error = %e,
                    "Failed to publish event (no receivers)"
                );
            }
        }
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_notice_reaches_draft_subscriber() {
        let publisher = EventPublisher::new();
        let draft_id = DraftId::new();
        let mut rx = publisher.register_draft(draft_id);

        publisher.publish_error_notice(draft_id, "Error");
        publisher.unregister_draft(draft_id);

        match rx.recv().await.unwrap() {
            WsEvent::Notice { title, variant, .. } => {
                assert_eq!(title, "Error");
                assert_eq!(variant, NoticeVariant::Destructive);
            }
            other => panic!("unexpected event: {:?}", other),
        }
        // 通道已关闭
        assert!(rx.recv().await.is_err());
    }

    #[tokio::test]
    async fn test_global_events() {
        let publisher = EventPublisher::new();
        let mut rx = publisher.subscribe_global();

        publisher.publish_user_upserted("clerk_abc");

        match rx.recv().await.unwrap() {
            WsEvent::UserUpserted { identity_ref } => assert_eq!(identity_ref, "clerk_abc"),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_release_keeps_channel_while_subscribed() {
        let publisher = EventPublisher::new();
        let draft_id = DraftId::new();
        let first = publisher.register_draft(draft_id);
        let mut second = publisher.register_draft(draft_id);

        drop(first);
        publisher.release_draft(draft_id);
        publisher.publish_notice(draft_id, "Podcast created");
        assert!(matches!(second.recv().await.unwrap(), WsEvent::Notice { .. }));

        drop(second);
        publisher.release_draft(draft_id);
        assert!(publisher.draft_channels.get(&draft_id).is_none());
    }

    #[test]
    fn test_notice_without_subscriber_is_dropped() {
        let publisher = EventPublisher::new();
        publisher.publish_notice(DraftId::new(), "Podcast created");
    }
}
