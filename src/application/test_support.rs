//! 应用层测试用的内存仓储

use async_trait::async_trait;
use std::sync::Mutex;
use uuid::Uuid;

use crate::application::ports::{
    PodcastRecord, PodcastRepositoryPort, RepositoryError, TopCreatorRecord, UserRecord,
    UserRepositoryPort,
};

/// 记录所有写入的播客仓储，可配置为写入失败
#[derive(Default)]
pub struct MockPodcastRepo {
    pub created: Mutex<Vec<PodcastRecord>>,
    pub fail_create: bool,
}

impl MockPodcastRepo {
    pub fn failing() -> Self {
        Self {
            fail_create: true,
            ..Default::default()
        }
    }

    pub fn create_calls(&self) -> usize {
        self.created.lock().unwrap().len()
    }
}

#[async_trait]
impl PodcastRepositoryPort for MockPodcastRepo {
    async fn create(&self, podcast: &PodcastRecord) -> Result<(), RepositoryError> {
        if self.fail_create {
            return Err(RepositoryError::DatabaseError("disk I/O error".to_string()));
        }
        self.created.lock().unwrap().push(podcast.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PodcastRecord>, RepositoryError> {
        Ok(self
            .created
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn find_by_author(&self, author_ref: &str) -> Result<Vec<PodcastRecord>, RepositoryError> {
        Ok(self
            .created
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.author_ref == author_ref)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MockUserRepo {
    pub users: Mutex<Vec<UserRecord>>,
}

impl MockUserRepo {
    pub fn with_user(identity_ref: &str, name: &str) -> Self {
        let repo = Self::default();
        repo.users.lock().unwrap().push(UserRecord {
            id: Uuid::new_v4(),
            identity_ref: identity_ref.to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", identity_ref),
            image_url: String::new(),
            created_at: chrono::Utc::now(),
        });
        repo
    }
}

#[async_trait]
impl UserRepositoryPort for MockUserRepo {
    async fn upsert(&self, user: &UserRecord) -> Result<(), RepositoryError> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.identity_ref == user.identity_ref) {
            Some(existing) => {
                existing.name = user.name.clone();
                existing.email = user.email.clone();
                existing.image_url = user.image_url.clone();
            }
            None => users.push(user.clone()),
        }
        Ok(())
    }

    async fn find_by_identity(
        &self,
        identity_ref: &str,
    ) -> Result<Option<UserRecord>, RepositoryError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.identity_ref == identity_ref)
            .cloned())
    }

    async fn top_by_podcast_count(&self) -> Result<Vec<TopCreatorRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}
