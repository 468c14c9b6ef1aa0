//! User Command Handlers

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{UserRecord, UserRepositoryPort};
use crate::infrastructure::events::EventPublisher;

/// UpsertUser Handler - 同步身份提供方的用户信息
pub struct UpsertUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
    event_publisher: Arc<EventPublisher>,
}

impl UpsertUserHandler {
    pub fn new(
        user_repo: Arc<dyn UserRepositoryPort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            user_repo,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: UpsertUser) -> Result<UserRecord, ApplicationError> {
        let identity_ref = cmd.identity_ref.trim();
        if identity_ref.is_empty() {
            return Err(ApplicationError::validation("identity_ref is required"));
        }
        if cmd.name.trim().is_empty() {
            return Err(ApplicationError::validation("name is required"));
        }

        let record = UserRecord {
            id: Uuid::new_v4(),
            identity_ref: identity_ref.to_string(),
            name: cmd.name.trim().to_string(),
            email: cmd.email,
            image_url: cmd.image_url,
            created_at: Utc::now(),
        };
        self.user_repo.upsert(&record).await?;

        // 返回持久化后的记录（更新时保留原 id 与创建时间）
        let stored = self
            .user_repo
            .find_by_identity(&record.identity_ref)
            .await?
            .ok_or_else(|| ApplicationError::internal("user vanished after upsert"))?;

        self.event_publisher.publish_user_upserted(&stored.identity_ref);
        tracing::info!(identity_ref = %stored.identity_ref, "User upserted");

        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::MockUserRepo;
    use crate::infrastructure::events::WsEvent;

    #[tokio::test]
    async fn test_upsert_updates_existing_user() {
        let repo = Arc::new(MockUserRepo::with_user("clerk_abc", "Ada"));
        let original_id = repo.users.lock().unwrap()[0].id;
        let publisher = EventPublisher::new().arc();
        let mut global = publisher.subscribe_global();
        let handler = UpsertUserHandler::new(repo.clone(), publisher);

        let stored = handler
            .handle(UpsertUser {
                identity_ref: "clerk_abc".to_string(),
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                image_url: "https://img.example.com/ada.png".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(stored.id, original_id);
        assert_eq!(stored.name, "Ada Lovelace");
        assert_eq!(repo.users.lock().unwrap().len(), 1);
        assert!(matches!(
            global.try_recv().unwrap(),
            WsEvent::UserUpserted { .. }
        ));
    }

    #[tokio::test]
    async fn test_empty_identity_is_rejected() {
        let handler = UpsertUserHandler::new(
            Arc::new(MockUserRepo::default()),
            EventPublisher::new().arc(),
        );

        let result = handler
            .handle(UpsertUser {
                identity_ref: "  ".to_string(),
                name: "Ada".to_string(),
                email: String::new(),
                image_url: String::new(),
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
    }
}
