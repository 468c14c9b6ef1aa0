//! SQLite Podcast Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{PodcastRecord, PodcastRepositoryPort, RepositoryError};

/// SQLite Podcast Repository
pub struct SqlitePodcastRepository {
    pool: DbPool,
}

impl SqlitePodcastRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

const PODCAST_COLUMNS: &str = "id, author_ref, author_name, author_image_url, title, description, audio_url, audio_storage_id, \
    audio_duration_secs, image_url, image_storage_id, voice_type, voice_prompt, image_prompt, \
    views, created_at";

#[derive(FromRow)]
struct PodcastRow {
    id: String,
    author_ref: String,
    author_name: String,
    author_image_url: String,
    title: String,
    description: String,
    audio_url: String,
    audio_storage_id: String,
    audio_duration_secs: f64,
    image_url: String,
    image_storage_id: String,
    voice_type: String,
    voice_prompt: String,
    image_prompt: String,
    views: i64,
    created_at: String,
}

fn parse_uuid(value: &str) -> Result<Uuid, RepositoryError> {
    Uuid::parse_str(value).map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

impl TryFrom<PodcastRow> for PodcastRecord {
    type Error = RepositoryError;

    fn try_from(row: PodcastRow) -> Result<Self, Self::Error> {
        Ok(PodcastRecord {
            id: parse_uuid(&row.id)?,
            author_ref: row.author_ref,
            author_name: row.author_name,
            author_image_url: row.author_image_url,
            title: row.title,
            description: row.description,
            audio_url: row.audio_url,
            audio_storage_id: parse_uuid(&row.audio_storage_id)?,
            audio_duration_secs: row.audio_duration_secs,
            image_url: row.image_url,
            image_storage_id: parse_uuid(&row.image_storage_id)?,
            voice_type: row.voice_type,
            voice_prompt: row.voice_prompt,
            image_prompt: row.image_prompt,
            views: row.views.max(0) as u64,
            created_at: DateTime::parse_from_rfc3339(&row.created_at)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?
                .with_timezone(&Utc),
        })
    }
}

#[async_trait]
impl PodcastRepositoryPort for SqlitePodcastRepository {
    async fn create(&self, podcast: &PodcastRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO podcasts (
                id, author_ref, author_name, author_image_url, title, description,
                audio_url, audio_storage_id, audio_duration_secs, image_url,
                image_storage_id, voice_type, voice_prompt, image_prompt, views, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(podcast.id.to_string())
        .bind(&podcast.author_ref)
        .bind(&podcast.author_name)
        .bind(&podcast.author_image_url)
        .bind(&podcast.title)
        .bind(&podcast.description)
        .bind(&podcast.audio_url)
        .bind(podcast.audio_storage_id.to_string())
        .bind(podcast.audio_duration_secs)
        .bind(&podcast.image_url)
        .bind(podcast.image_storage_id.to_string())
        .bind(&podcast.voice_type)
        .bind(&podcast.voice_prompt)
        .bind(&podcast.image_prompt)
        .bind(podcast.views as i64)
        .bind(podcast.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepositoryError::Duplicate(format!("podcast {}", podcast.id))
            }
            other => RepositoryError::DatabaseError(other.to_string()),
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PodcastRecord>, RepositoryError> {
        let row: Option<PodcastRow> = sqlx::query_as(&format!(
            "SELECT {} FROM podcasts WHERE id = ?",
            PODCAST_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(PodcastRecord::try_from).transpose()
    }

    async fn find_by_author(&self, author_ref: &str) -> Result<Vec<PodcastRecord>, RepositoryError> {
        let rows: Vec<PodcastRow> = sqlx::query_as(&format!(
            "SELECT {} FROM podcasts WHERE author_ref = ? ORDER BY created_at DESC",
            PODCAST_COLUMNS
        ))
        .bind(author_ref)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(PodcastRecord::try_from).collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};

    pub(crate) async fn memory_pool() -> DbPool {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    pub(crate) fn sample_podcast(author_ref: &str, title: &str) -> PodcastRecord {
        PodcastRecord {
            id: Uuid::new_v4(),
            author_ref: author_ref.to_string(),
            author_name: "Ada".to_string(),
            author_image_url: String::new(),
            title: title.to_string(),
            description: "An episode".to_string(),
            audio_url: "http://localhost/api/storage/a".to_string(),
            audio_storage_id: Uuid::new_v4(),
            audio_duration_secs: 42.5,
            image_url: "http://localhost/api/storage/i".to_string(),
            image_storage_id: Uuid::new_v4(),
            voice_type: "nova".to_string(),
            voice_prompt: "Hello listeners".to_string(),
            image_prompt: "a microphone".to_string(),
            views: 0,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = SqlitePodcastRepository::new(memory_pool().await);
        let podcast = sample_podcast("clerk_abc", "Episode 1");

        repo.create(&podcast).await.unwrap();

        let found = repo.find_by_id(podcast.id).await.unwrap().unwrap();
        assert_eq!(found.title, "Episode 1");
        assert_eq!(found.views, 0);
        assert_eq!(found.audio_storage_id, podcast.audio_storage_id);
        assert_eq!(found.audio_duration_secs, 42.5);

        assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() {
        let repo = SqlitePodcastRepository::new(memory_pool().await);
        let podcast = sample_podcast("clerk_abc", "Episode 1");

        repo.create(&podcast).await.unwrap();
        let second = repo.create(&podcast).await;

        assert!(matches!(second, Err(RepositoryError::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_find_by_author() {
        let repo = SqlitePodcastRepository::new(memory_pool().await);
        repo.create(&sample_podcast("clerk_abc", "A")).await.unwrap();
        repo.create(&sample_podcast("clerk_abc", "B")).await.unwrap();
        repo.create(&sample_podcast("clerk_xyz", "C")).await.unwrap();

        let podcasts = repo.find_by_author("clerk_abc").await.unwrap();
        assert_eq!(podcasts.len(), 2);
        assert!(podcasts.iter().all(|p| p.author_ref == "clerk_abc"));
    }
}
