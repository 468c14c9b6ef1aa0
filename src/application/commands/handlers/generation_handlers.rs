//! Generation Command Handlers - 旁白音频与封面生成
//!
//! 生成调用被完整 await，结果写回草稿后才返回

use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    AudioProbePort, BlobStoragePort, DraftFieldsPatch, DraftManagerPort, DraftStoreError,
    ImageEnginePort, ImageRequest, SpeechEnginePort, SpeechRequest, StoredBlob,
};
use crate::application::queries::handlers::load_owned_draft;
use crate::domain::podcast::{DraftId, GeneratedAudio, GeneratedImage, StorageId};

/// 音频生成响应
#[derive(Debug, Clone)]
pub struct GenerateAudioResponse {
    pub audio_url: String,
    pub storage_id: Uuid,
    pub duration_secs: f64,
}

/// 封面生成响应
#[derive(Debug, Clone)]
pub struct GenerateThumbnailResponse {
    pub image_url: String,
    pub storage_id: Uuid,
}

/// 写回失败时删除刚保存的对象
async fn discard_orphan(
    blob_storage: &dyn BlobStoragePort,
    draft_id: DraftId,
    stored: &StoredBlob,
    err: &DraftStoreError,
) {
    tracing::warn!(
        draft_id = %draft_id,
        storage_id = %stored.storage_id,
        error = %err,
        "Generated asset rejected by draft, discarding"
    );
    if let Err(e) = blob_storage.delete(stored.storage_id).await {
        tracing::warn!(storage_id = %stored.storage_id, error = %e, "Failed to delete orphan blob");
    }
}

/// 删除被新生成结果替换的旧对象
async fn release_replaced(
    blob_storage: &dyn BlobStoragePort,
    draft_id: DraftId,
    storage_id: StorageId,
) {
    tracing::debug!(draft_id = %draft_id, storage_id = %storage_id, "Releasing replaced asset");
    if let Err(e) = blob_storage.delete(storage_id).await {
        tracing::warn!(storage_id = %storage_id, error = %e, "Failed to delete replaced blob");
    }
}

/// GenerateAudio Handler
pub struct GenerateAudioHandler {
    draft_manager: Arc<dyn DraftManagerPort>,
    speech_engine: Arc<dyn SpeechEnginePort>,
    audio_probe: Arc<dyn AudioProbePort>,
    blob_storage: Arc<dyn BlobStoragePort>,
}

impl GenerateAudioHandler {
    pub fn new(
        draft_manager: Arc<dyn DraftManagerPort>,
        speech_engine: Arc<dyn SpeechEnginePort>,
        audio_probe: Arc<dyn AudioProbePort>,
        blob_storage: Arc<dyn BlobStoragePort>,
    ) -> Self {
        Self {
            draft_manager,
            speech_engine,
            audio_probe,
            blob_storage,
        }
    }

    pub async fn handle(
        &self,
        cmd: GenerateAudio,
    ) -> Result<GenerateAudioResponse, ApplicationError> {
        let mut form =
            load_owned_draft(self.draft_manager.as_ref(), &cmd.draft_id, &cmd.author_ref)?;

        if let Some(prompt) = cmd.voice_prompt {
            let patch = DraftFieldsPatch {
                voice_prompt: Some(prompt),
                ..Default::default()
            };
            form = self.draft_manager.update_fields(&cmd.draft_id, patch)?;
        }

        let (voice_type, input) = form.audio_request()?;

        tracing::info!(
            draft_id = %cmd.draft_id,
            voice_type = %voice_type,
            input_len = input.len(),
            "Generating podcast audio"
        );

        let speech = self
            .speech_engine
            .synthesize(SpeechRequest { input, voice_type })
            .await?;

        let duration_secs = self
            .audio_probe
            .duration_secs(&speech.audio_data, &speech.content_type)?;

        let stored = self
            .blob_storage
            .save(&speech.audio_data, &speech.content_type)
            .await?;

        let audio = GeneratedAudio {
            url: stored.url.clone(),
            storage_id: stored.storage_id,
            duration_secs,
        };
        match self.draft_manager.apply_audio(&cmd.draft_id, audio) {
            Ok(Some(previous)) => {
                release_replaced(self.blob_storage.as_ref(), cmd.draft_id, previous.storage_id)
                    .await
            }
            Ok(None) => {}
            Err(e) => {
                discard_orphan(self.blob_storage.as_ref(), cmd.draft_id, &stored, &e).await;
                return Err(e.into());
            }
        }

        tracing::info!(
            draft_id = %cmd.draft_id,
            storage_id = %stored.storage_id,
            duration_secs = duration_secs,
            "Podcast audio generated"
        );

        Ok(GenerateAudioResponse {
            audio_url: stored.url,
            storage_id: *stored.storage_id.as_uuid(),
            duration_secs,
        })
    }
}

/// GenerateThumbnail Handler
pub struct GenerateThumbnailHandler {
    draft_manager: Arc<dyn DraftManagerPort>,
    image_engine: Arc<dyn ImageEnginePort>,
    blob_storage: Arc<dyn BlobStoragePort>,
}

impl GenerateThumbnailHandler {
    pub fn new(
        draft_manager: Arc<dyn DraftManagerPort>,
        image_engine: Arc<dyn ImageEnginePort>,
        blob_storage: Arc<dyn BlobStoragePort>,
    ) -> Self {
        Self {
            draft_manager,
            image_engine,
            blob_storage,
        }
    }

    pub async fn handle(
        &self,
        cmd: GenerateThumbnail,
    ) -> Result<GenerateThumbnailResponse, ApplicationError> {
        let mut form =
            load_owned_draft(self.draft_manager.as_ref(), &cmd.draft_id, &cmd.author_ref)?;

        if let Some(prompt) = cmd.image_prompt {
            let patch = DraftFieldsPatch {
                image_prompt: Some(prompt),
                ..Default::default()
            };
            form = self.draft_manager.update_fields(&cmd.draft_id, patch)?;
        }

        let prompt = form.image_request()?;

        tracing::info!(
            draft_id = %cmd.draft_id,
            prompt_len = prompt.len(),
            "Generating podcast thumbnail"
        );

        let image = self.image_engine.generate(ImageRequest { prompt }).await?;

        let stored = self
            .blob_storage
            .save(&image.image_data, &image.content_type)
            .await?;

        let generated = GeneratedImage {
            url: stored.url.clone(),
            storage_id: stored.storage_id,
        };
        match self.draft_manager.apply_image(&cmd.draft_id, generated) {
            Ok(Some(previous)) => {
                release_replaced(self.blob_storage.as_ref(), cmd.draft_id, previous.storage_id)
                    .await
            }
            Ok(None) => {}
            Err(e) => {
                discard_orphan(self.blob_storage.as_ref(), cmd.draft_id, &stored, &e).await;
                return Err(e.into());
            }
        }

        tracing::info!(
            draft_id = %cmd.draft_id,
            storage_id = %stored.storage_id,
            "Podcast thumbnail generated"
        );

        Ok(GenerateThumbnailResponse {
            image_url: stored.url,
            storage_id: *stored.storage_id.as_uuid(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::podcast::{CreationForm, VoiceType};
    use crate::infrastructure::adapters::{
        FakeImageClient, FakeSpeechClient, FileBlobStorage, SymphoniaProbe,
    };
    use crate::infrastructure::memory::InMemoryDraftManager;
    use tempfile::TempDir;

    async fn blob_storage() -> (TempDir, Arc<FileBlobStorage>) {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = FileBlobStorage::new(temp_dir.path(), "http://localhost:5060")
            .await
            .unwrap();
        (temp_dir, Arc::new(storage))
    }

    #[tokio::test]
    async fn test_generate_audio_records_url_and_duration() {
        let (_dir, storage) = blob_storage().await;
        let manager: Arc<dyn DraftManagerPort> = Arc::new(InMemoryDraftManager::new());
        let mut form = CreationForm::new("clerk_abc");
        form.select_voice(VoiceType::Nova).unwrap();
        let draft_id = manager.create(form).unwrap();

        let handler = GenerateAudioHandler::new(
            manager.clone(),
            Arc::new(FakeSpeechClient::with_defaults()),
            Arc::new(SymphoniaProbe::new()),
            storage.clone(),
        );

        let response = handler
            .handle(GenerateAudio {
                draft_id,
                author_ref: "clerk_abc".to_string(),
                voice_prompt: Some("Welcome to the show".to_string()),
            })
            .await
            .unwrap();

        assert!((response.duration_secs - 1.0).abs() < 1e-6);
        assert!(response.audio_url.starts_with("http://localhost:5060/api/storage/"));

        let form = manager.get(&draft_id).unwrap();
        let audio = form.draft().audio.as_ref().unwrap();
        assert_eq!(audio.url, response.audio_url);
        assert_eq!(form.draft().voice_prompt, "Welcome to the show");
        assert!(storage
            .read(StorageId::from_uuid(response.storage_id))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_generate_audio_requires_voice() {
        let (_dir, storage) = blob_storage().await;
        let manager: Arc<dyn DraftManagerPort> = Arc::new(InMemoryDraftManager::new());
        let draft_id = manager.create(CreationForm::new("clerk_abc")).unwrap();
        let speech = Arc::new(FakeSpeechClient::with_defaults());

        let handler = GenerateAudioHandler::new(
            manager.clone(),
            speech.clone(),
            Arc::new(SymphoniaProbe::new()),
            storage,
        );

        let result = handler
            .handle(GenerateAudio {
                draft_id,
                author_ref: "clerk_abc".to_string(),
                voice_prompt: Some("hello".to_string()),
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
        assert_eq!(speech.calls(), 0);
    }

    #[tokio::test]
    async fn test_speech_failure_leaves_draft_untouched() {
        let (_dir, storage) = blob_storage().await;
        let manager: Arc<dyn DraftManagerPort> = Arc::new(InMemoryDraftManager::new());
        let mut form = CreationForm::new("clerk_abc");
        form.select_voice(VoiceType::Echo).unwrap();
        form.set_voice_prompt("hello").unwrap();
        let draft_id = manager.create(form).unwrap();

        let handler = GenerateAudioHandler::new(
            manager.clone(),
            Arc::new(FakeSpeechClient::failing()),
            Arc::new(SymphoniaProbe::new()),
            storage,
        );

        let result = handler
            .handle(GenerateAudio {
                draft_id,
                author_ref: "clerk_abc".to_string(),
                voice_prompt: None,
            })
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::ExternalServiceError(_))
        ));
        assert!(manager.get(&draft_id).unwrap().draft().audio.is_none());
    }

    #[tokio::test]
    async fn test_generate_thumbnail() {
        let (_dir, storage) = blob_storage().await;
        let manager: Arc<dyn DraftManagerPort> = Arc::new(InMemoryDraftManager::new());
        let draft_id = manager.create(CreationForm::new("clerk_abc")).unwrap();
        let image = Arc::new(FakeImageClient::new());

        let handler = GenerateThumbnailHandler::new(manager.clone(), image.clone(), storage);

        let empty = handler
            .handle(GenerateThumbnail {
                draft_id,
                author_ref: "clerk_abc".to_string(),
                image_prompt: None,
            })
            .await;
        assert!(matches!(empty, Err(ApplicationError::ValidationError(_))));
        assert_eq!(image.calls(), 0);

        let response = handler
            .handle(GenerateThumbnail {
                draft_id,
                author_ref: "clerk_abc".to_string(),
                image_prompt: Some("a neon microphone".to_string()),
            })
            .await
            .unwrap();

        let form = manager.get(&draft_id).unwrap();
        assert_eq!(form.draft().image.as_ref().unwrap().url, response.image_url);
        assert_eq!(image.calls(), 1);
    }

    #[tokio::test]
    async fn test_regenerating_audio_deletes_previous_blob() {
        let (dir, storage) = blob_storage().await;
        let manager: Arc<dyn DraftManagerPort> = Arc::new(InMemoryDraftManager::new());
        let mut form = CreationForm::new("clerk_abc");
        form.select_voice(VoiceType::Nova).unwrap();
        form.set_voice_prompt("Welcome back").unwrap();
        let draft_id = manager.create(form).unwrap();

        let handler = GenerateAudioHandler::new(
            manager.clone(),
            Arc::new(FakeSpeechClient::with_defaults()),
            Arc::new(SymphoniaProbe::new()),
            storage.clone(),
        );
        let cmd = GenerateAudio {
            draft_id,
            author_ref: "clerk_abc".to_string(),
            voice_prompt: None,
        };

        let first = handler.handle(cmd.clone()).await.unwrap();
        let second = handler.handle(cmd).await.unwrap();
        assert_ne!(first.storage_id, second.storage_id);

        assert!(storage
            .read(StorageId::from_uuid(first.storage_id))
            .await
            .is_err());
        assert!(storage
            .read(StorageId::from_uuid(second.storage_id))
            .await
            .is_ok());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);

        let form = manager.get(&draft_id).unwrap();
        assert_eq!(form.draft().audio.as_ref().unwrap().url, second.audio_url);
    }

    #[tokio::test]
    async fn test_regenerating_thumbnail_deletes_previous_blob() {
        let (dir, storage) = blob_storage().await;
        let manager: Arc<dyn DraftManagerPort> = Arc::new(InMemoryDraftManager::new());
        let draft_id = manager.create(CreationForm::new("clerk_abc")).unwrap();

        let handler = GenerateThumbnailHandler::new(
            manager.clone(),
            Arc::new(FakeImageClient::new()),
            storage.clone(),
        );
        let cmd = GenerateThumbnail {
            draft_id,
            author_ref: "clerk_abc".to_string(),
            image_prompt: Some("a neon microphone".to_string()),
        };

        let first = handler.handle(cmd.clone()).await.unwrap();
        let second = handler.handle(cmd).await.unwrap();

        assert!(storage
            .read(StorageId::from_uuid(first.storage_id))
            .await
            .is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
        assert_eq!(
            manager.get(&draft_id).unwrap().draft().image.as_ref().unwrap().url,
            second.image_url
        );
    }
}
