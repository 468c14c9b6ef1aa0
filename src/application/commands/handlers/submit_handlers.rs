//! Submit Command Handler - 提交并发布播客
//!
//! Idle -> Submitting -> PersistedRedirecting | Idle
//! 同一草稿同一时刻最多一个持久化请求

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    DraftManagerPort, DraftStoreError, PodcastRecord, PodcastRepositoryPort, UserRepositoryPort,
};
use crate::application::queries::handlers::load_owned_draft;
use crate::domain::podcast::{DraftError, NewPodcast, PodcastId};
use crate::domain::Navigation;
use crate::infrastructure::events::EventPublisher;

/// 发布成功提示
pub const PODCAST_CREATED_NOTICE: &str = "Podcast created";
/// 持久化失败提示
pub const SUBMIT_ERROR_NOTICE: &str = "Error";

/// 提交响应
#[derive(Debug, Clone)]
pub struct SubmitDraftResponse {
    pub podcast_id: Uuid,
    /// 成功后的跳转目标
    pub redirect: String,
}

/// SubmitDraft Handler
pub struct SubmitDraftHandler {
    draft_manager: Arc<dyn DraftManagerPort>,
    podcast_repo: Arc<dyn PodcastRepositoryPort>,
    user_repo: Arc<dyn UserRepositoryPort>,
    event_publisher: Arc<EventPublisher>,
}

impl SubmitDraftHandler {
    pub fn new(
        draft_manager: Arc<dyn DraftManagerPort>,
        podcast_repo: Arc<dyn PodcastRepositoryPort>,
        user_repo: Arc<dyn UserRepositoryPort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            draft_manager,
            podcast_repo,
            user_repo,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: SubmitDraft) -> Result<SubmitDraftResponse, ApplicationError> {
        load_owned_draft(self.draft_manager.as_ref(), &cmd.draft_id, &cmd.author_ref)?;

        let new_podcast = match self.draft_manager.begin_submit(&cmd.draft_id) {
            Ok(p) => p,
            Err(DraftStoreError::Rejected(
                e @ (DraftError::AlreadySubmitting | DraftError::AlreadyPublished),
            )) => {
                tracing::debug!(draft_id = %cmd.draft_id, error = %e, "Duplicate submit ignored");
                return Err(e.into());
            }
            Err(DraftStoreError::Rejected(e)) => {
                self.event_publisher
                    .publish_notice(cmd.draft_id, &e.to_string());
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        };

        let podcast_id = PodcastId::new();
        let title = new_podcast.title.as_str().to_string();

        match self.persist(podcast_id, new_podcast).await {
            Ok(()) => {
                // 记录已写入，草稿状态异常不影响结果
                let navigation = match self.draft_manager.complete_submit(&cmd.draft_id, podcast_id) {
                    Ok(navigation) => navigation,
                    Err(e) => {
                        tracing::warn!(
                            draft_id = %cmd.draft_id,
                            podcast_id = %podcast_id,
                            error = %e,
                            "Draft changed while podcast was persisted"
                        );
                        Navigation::Home
                    }
                };

                self.event_publisher
                    .publish_notice(cmd.draft_id, PODCAST_CREATED_NOTICE);
                self.event_publisher.publish_podcast_created(
                    *podcast_id.as_uuid(),
                    &cmd.author_ref,
                    &title,
                );

                if let Err(e) = self.draft_manager.remove(&cmd.draft_id) {
                    tracing::warn!(draft_id = %cmd.draft_id, error = %e, "Failed to remove published draft");
                }
                self.event_publisher.unregister_draft(cmd.draft_id);

                tracing::info!(
                    draft_id = %cmd.draft_id,
                    podcast_id = %podcast_id,
                    author_ref = %cmd.author_ref,
                    "Podcast published"
                );

                Ok(SubmitDraftResponse {
                    podcast_id: *podcast_id.as_uuid(),
                    redirect: navigation.path(),
                })
            }
            Err(e) => {
                tracing::error!(
                    draft_id = %cmd.draft_id,
                    error = %e,
                    "Failed to persist podcast"
                );
                if let Err(reset) = self.draft_manager.fail_submit(&cmd.draft_id) {
                    tracing::warn!(draft_id = %cmd.draft_id, error = %reset, "Failed to reset draft state");
                }
                self.event_publisher
                    .publish_error_notice(cmd.draft_id, SUBMIT_ERROR_NOTICE);
                Err(e)
            }
        }
    }

    async fn persist(
        &self,
        podcast_id: PodcastId,
        podcast: NewPodcast,
    ) -> Result<(), ApplicationError> {
        // 作者必须已同步到用户表
        let author = self
            .user_repo
            .find_by_identity(&podcast.author_ref)
            .await?
            .ok_or_else(|| ApplicationError::not_found_str("User", &podcast.author_ref))?;

        let record = PodcastRecord {
            id: *podcast_id.as_uuid(),
            author_ref: podcast.author_ref,
            author_name: author.name,
            author_image_url: author.image_url,
            title: podcast.title.into_inner(),
            description: podcast.description.into_inner(),
            audio_url: podcast.audio.url,
            audio_storage_id: *podcast.audio.storage_id.as_uuid(),
            audio_duration_secs: podcast.audio.duration_secs,
            image_url: podcast.image.url,
            image_storage_id: *podcast.image.storage_id.as_uuid(),
            voice_type: podcast.voice_type.as_str().to_string(),
            voice_prompt: podcast.voice_prompt,
            image_prompt: podcast.image_prompt,
            views: podcast.views,
            created_at: Utc::now(),
        };

        self.podcast_repo.create(&record).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{MockPodcastRepo, MockUserRepo};
    use crate::application::ports::DraftFieldsPatch;
    use crate::domain::podcast::{
        CreationForm, DraftId, GeneratedAudio, GeneratedImage, StorageId, SubmissionState,
        VoiceType,
    };
    use crate::infrastructure::events::{NoticeVariant, WsEvent};
    use crate::infrastructure::memory::InMemoryDraftManager;

    struct Fixture {
        manager: Arc<InMemoryDraftManager>,
        podcasts: Arc<MockPodcastRepo>,
        publisher: Arc<EventPublisher>,
        handler: SubmitDraftHandler,
    }

    fn fixture(podcasts: MockPodcastRepo) -> Fixture {
        let manager = Arc::new(InMemoryDraftManager::new());
        let podcasts = Arc::new(podcasts);
        let publisher = EventPublisher::new().arc();
        let handler = SubmitDraftHandler::new(
            manager.clone(),
            podcasts.clone(),
            Arc::new(MockUserRepo::with_user("clerk_abc", "Ada")),
            publisher.clone(),
        );
        Fixture {
            manager,
            podcasts,
            publisher,
            handler,
        }
    }

    fn form_with(audio: bool, image: bool, voice: bool) -> CreationForm {
        let mut form = CreationForm::new("clerk_abc");
        form.set_title("My Pod").unwrap();
        form.set_description("A show about things").unwrap();
        form.set_voice_prompt("Welcome").unwrap();
        form.set_image_prompt("neon mic").unwrap();
        if voice {
            form.select_voice(VoiceType::Alloy).unwrap();
        }
        if audio {
            form.apply_audio(GeneratedAudio {
                url: "http://localhost/api/storage/a".to_string(),
                storage_id: StorageId::new(),
                duration_secs: 12.5,
            })
            .unwrap();
        }
        if image {
            form.apply_image(GeneratedImage {
                url: "http://localhost/api/storage/i".to_string(),
                storage_id: StorageId::new(),
            })
            .unwrap();
        }
        form
    }

    fn submit(draft_id: DraftId) -> SubmitDraft {
        SubmitDraft {
            draft_id,
            author_ref: "clerk_abc".to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_assets_never_persists() {
        let f = fixture(MockPodcastRepo::default());

        // 除全部就绪外的 7 种组合
        for mask in 0u8..7 {
            let (audio, image, voice) = (mask & 1 != 0, mask & 2 != 0, mask & 4 != 0);
            let draft_id = f.manager.create(form_with(audio, image, voice)).unwrap();
            let mut events = f.publisher.register_draft(draft_id);

            let result = f.handler.handle(submit(draft_id)).await;

            assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
            match events.try_recv().unwrap() {
                WsEvent::Notice { title, variant, .. } => {
                    assert_eq!(title, "Please generate audio and image");
                    assert_eq!(variant, NoticeVariant::Default);
                }
                other => panic!("unexpected event: {:?}", other),
            }
            let form = f.manager.get(&draft_id).unwrap();
            assert_eq!(form.state(), SubmissionState::Idle);
        }

        assert_eq!(f.podcasts.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_successful_submit_persists_once_and_redirects_home() {
        let f = fixture(MockPodcastRepo::default());
        let draft_id = f.manager.create(form_with(true, true, true)).unwrap();
        let mut events = f.publisher.register_draft(draft_id);
        let mut global = f.publisher.subscribe_global();

        let response = f.handler.handle(submit(draft_id)).await.unwrap();

        assert_eq!(response.redirect, "/");
        assert_eq!(f.podcasts.create_calls(), 1);

        let created = f.podcasts.created.lock().unwrap()[0].clone();
        assert_eq!(created.id, response.podcast_id);
        assert_eq!(created.views, 0);
        assert_eq!(created.title, "My Pod");
        assert_eq!(created.author_name, "Ada");
        assert_eq!(created.voice_type, "alloy");
        assert_eq!(created.audio_duration_secs, 12.5);

        match events.try_recv().unwrap() {
            WsEvent::Notice { title, .. } => assert_eq!(title, "Podcast created"),
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(matches!(
            global.try_recv().unwrap(),
            WsEvent::PodcastCreated { .. }
        ));

        // 发布后草稿被回收
        assert!(f.manager.get(&draft_id).is_err());
    }

    #[tokio::test]
    async fn test_persist_failure_returns_to_idle_with_fields_intact() {
        let f = fixture(MockPodcastRepo::failing());
        let form = form_with(true, true, true);
        let before = form.draft().clone();
        let draft_id = f.manager.create(form).unwrap();
        let mut events = f.publisher.register_draft(draft_id);

        let result = f.handler.handle(submit(draft_id)).await;

        assert!(matches!(result, Err(ApplicationError::RepositoryError(_))));
        let form = f.manager.get(&draft_id).unwrap();
        assert_eq!(form.state(), SubmissionState::Idle);
        assert!(!form.is_submitting());
        assert_eq!(form.draft(), &before);

        match events.try_recv().unwrap() {
            WsEvent::Notice { title, variant, .. } => {
                assert_eq!(title, "Error");
                assert_eq!(variant, NoticeVariant::Destructive);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_author_is_a_persist_failure() {
        let manager = Arc::new(InMemoryDraftManager::new());
        let podcasts = Arc::new(MockPodcastRepo::default());
        let handler = SubmitDraftHandler::new(
            manager.clone(),
            podcasts.clone(),
            Arc::new(MockUserRepo::default()),
            EventPublisher::new().arc(),
        );
        let draft_id = manager.create(form_with(true, true, true)).unwrap();

        let result = handler.handle(submit(draft_id)).await;

        assert!(matches!(result, Err(ApplicationError::NotFound { .. })));
        assert_eq!(podcasts.create_calls(), 0);
        assert_eq!(manager.get(&draft_id).unwrap().state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_submit_while_submitting_is_rejected() {
        let f = fixture(MockPodcastRepo::default());
        let draft_id = f.manager.create(form_with(true, true, true)).unwrap();
        f.manager.begin_submit(&draft_id).unwrap();

        let result = f.handler.handle(submit(draft_id)).await;

        assert!(matches!(result, Err(ApplicationError::Conflict(_))));
        assert_eq!(f.podcasts.create_calls(), 0);
    }

    /// 写入完成前草稿已被移除的管理器
    struct VanishingDrafts(InMemoryDraftManager);

    impl DraftManagerPort for VanishingDrafts {
        fn create(&self, form: CreationForm) -> Result<DraftId, DraftStoreError> {
            self.0.create(form)
        }
        fn get(&self, id: &DraftId) -> Result<CreationForm, DraftStoreError> {
            self.0.get(id)
        }
        fn update_fields(
            &self,
            id: &DraftId,
            patch: DraftFieldsPatch,
        ) -> Result<CreationForm, DraftStoreError> {
            self.0.update_fields(id, patch)
        }
        fn select_voice(&self, id: &DraftId, voice_type: VoiceType) -> Result<(), DraftStoreError> {
            self.0.select_voice(id, voice_type)
        }
        fn apply_audio(
            &self,
            id: &DraftId,
            audio: GeneratedAudio,
        ) -> Result<Option<GeneratedAudio>, DraftStoreError> {
            self.0.apply_audio(id, audio)
        }
        fn apply_image(
            &self,
            id: &DraftId,
            image: GeneratedImage,
        ) -> Result<Option<GeneratedImage>, DraftStoreError> {
            self.0.apply_image(id, image)
        }
        fn begin_submit(&self, id: &DraftId) -> Result<NewPodcast, DraftStoreError> {
            self.0.begin_submit(id)
        }
        fn complete_submit(
            &self,
            id: &DraftId,
            _podcast_id: PodcastId,
        ) -> Result<Navigation, DraftStoreError> {
            Err(DraftStoreError::NotFound(*id))
        }
        fn fail_submit(&self, id: &DraftId) -> Result<(), DraftStoreError> {
            self.0.fail_submit(id)
        }
        fn remove(&self, id: &DraftId) -> Result<(), DraftStoreError> {
            self.0.remove(id)
        }
        fn remove_if_idle(&self, id: &DraftId) -> Result<CreationForm, DraftStoreError> {
            self.0.remove_if_idle(id)
        }
        fn get_stale_drafts(&self, idle_timeout_secs: u64) -> Vec<DraftId> {
            self.0.get_stale_drafts(idle_timeout_secs)
        }
    }

    #[tokio::test]
    async fn test_persisted_podcast_succeeds_even_if_draft_vanished() {
        let manager = Arc::new(VanishingDrafts(InMemoryDraftManager::new()));
        let podcasts = Arc::new(MockPodcastRepo::default());
        let handler = SubmitDraftHandler::new(
            manager.clone(),
            podcasts.clone(),
            Arc::new(MockUserRepo::with_user("clerk_abc", "Ada")),
            EventPublisher::new().arc(),
        );
        let draft_id = manager.create(form_with(true, true, true)).unwrap();

        let response = handler.handle(submit(draft_id)).await.unwrap();

        assert_eq!(response.redirect, "/");
        assert_eq!(podcasts.create_calls(), 1);
    }
}
