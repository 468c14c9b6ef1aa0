//! SQLite User Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{
    RepositoryError, TopCreatorRecord, UserRecord, UserRepositoryPort,
};

/// SQLite User Repository
pub struct SqliteUserRepository {
    pool: DbPool,
}

impl SqliteUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: String,
    identity_ref: String,
    name: String,
    email: String,
    image_url: String,
    created_at: String,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(UserRecord {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            identity_ref: row.identity_ref,
            name: row.name,
            email: row.email,
            image_url: row.image_url,
            created_at: DateTime::parse_from_rfc3339(&row.created_at)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?
                .with_timezone(&Utc),
        })
    }
}

#[derive(FromRow)]
struct TopCreatorRow {
    identity_ref: String,
    name: String,
    image_url: String,
    total_podcasts: i64,
}

impl From<TopCreatorRow> for TopCreatorRecord {
    fn from(row: TopCreatorRow) -> Self {
        Self {
            identity_ref: row.identity_ref,
            name: row.name,
            image_url: row.image_url,
            total_podcasts: row.total_podcasts.max(0) as u64,
        }
    }
}

#[async_trait]
impl UserRepositoryPort for SqliteUserRepository {
    async fn upsert(&self, user: &UserRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, identity_ref, name, email, image_url, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(identity_ref) DO UPDATE SET
                name = excluded.name,
                email = excluded.email,
                image_url = excluded.image_url,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.identity_ref)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.image_url)
        .bind(user.created_at.to_rfc3339())
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_identity(
        &self,
        identity_ref: &str,
    ) -> Result<Option<UserRecord>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, identity_ref, name, email, image_url, created_at FROM users WHERE identity_ref = ?",
        )
        .bind(identity_ref)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(UserRecord::try_from).transpose()
    }

    async fn top_by_podcast_count(&self) -> Result<Vec<TopCreatorRecord>, RepositoryError> {
        let rows: Vec<TopCreatorRow> = sqlx::query_as(
            r#"
            SELECT u.identity_ref, u.name, u.image_url, COUNT(p.id) AS total_podcasts
            FROM users u
            LEFT JOIN podcasts p ON p.author_ref = u.identity_ref
            GROUP BY u.identity_ref, u.name, u.image_url
            ORDER BY total_podcasts DESC, u.name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(TopCreatorRecord::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::PodcastRepositoryPort;
    use crate::infrastructure::persistence::sqlite::podcast_repo::tests::{
        memory_pool, sample_podcast,
    };
    use crate::infrastructure::persistence::sqlite::SqlitePodcastRepository;

    fn user(identity_ref: &str, name: &str) -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            identity_ref: identity_ref.to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", identity_ref),
            image_url: format!("https://img.example.com/{}.png", identity_ref),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_upsert_keeps_single_row_per_identity() {
        let repo = SqliteUserRepository::new(memory_pool().await);
        let first = user("clerk_abc", "Ada");
        repo.upsert(&first).await.unwrap();

        let mut renamed = user("clerk_abc", "Ada Lovelace");
        renamed.email = "ada@lovelace.dev".to_string();
        repo.upsert(&renamed).await.unwrap();

        let stored = repo.find_by_identity("clerk_abc").await.unwrap().unwrap();
        assert_eq!(stored.id, first.id);
        assert_eq!(stored.name, "Ada Lovelace");
        assert_eq!(stored.email, "ada@lovelace.dev");
        assert!(repo.find_by_identity("clerk_xyz").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_top_by_podcast_count() {
        let pool = memory_pool().await;
        let users = SqliteUserRepository::new(pool.clone());
        let podcasts = SqlitePodcastRepository::new(pool);

        users.upsert(&user("u1", "Bea")).await.unwrap();
        users.upsert(&user("u2", "Cal")).await.unwrap();
        users.upsert(&user("u3", "Abe")).await.unwrap();

        for _ in 0..3 {
            podcasts.create(&sample_podcast("u2", "ep")).await.unwrap();
        }
        podcasts.create(&sample_podcast("u1", "ep")).await.unwrap();

        let top = users.top_by_podcast_count().await.unwrap();
        let order: Vec<(&str, u64)> = top
            .iter()
            .map(|t| (t.identity_ref.as_str(), t.total_podcasts))
            .collect();
        assert_eq!(order, vec![("u2", 3), ("u1", 1), ("u3", 0)]);
    }
}
