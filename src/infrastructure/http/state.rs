//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::{
    // Command handlers
    CreateDraftHandler, DiscardDraftHandler, GenerateAudioHandler, GenerateThumbnailHandler,
    SelectVoiceHandler, SubmitDraftHandler, UpdateDraftFieldsHandler, UpsertUserHandler,
    // Query handlers
    GetCreatorProfileHandler, GetDraftHandler, GetPodcastHandler, GetTopCreatorsHandler,
    ListVoiceTypesHandler,
    // Ports
    AudioProbePort, BlobStoragePort, DraftManagerPort, ImageEnginePort, PodcastRepositoryPort,
    RankingSnapshotPort, SpeechEnginePort, UserRepositoryPort,
};
use crate::infrastructure::events::EventPublisher;

/// 构建状态所需的端口实现
pub struct AppPorts {
    pub draft_manager: Arc<dyn DraftManagerPort>,
    pub podcast_repo: Arc<dyn PodcastRepositoryPort>,
    pub user_repo: Arc<dyn UserRepositoryPort>,
    pub speech_engine: Arc<dyn SpeechEnginePort>,
    pub image_engine: Arc<dyn ImageEnginePort>,
    pub audio_probe: Arc<dyn AudioProbePort>,
    pub blob_storage: Arc<dyn BlobStoragePort>,
    pub ranking: Arc<dyn RankingSnapshotPort>,
    pub event_publisher: Arc<EventPublisher>,
}

/// 试听样本位置
#[derive(Debug, Clone)]
pub struct VoicePreviewConfig {
    pub voices_dir: PathBuf,
    pub extension: String,
}

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub draft_manager: Arc<dyn DraftManagerPort>,
    pub blob_storage: Arc<dyn BlobStoragePort>,
    pub event_publisher: Arc<EventPublisher>,
    pub voice_previews: VoicePreviewConfig,

    // ========== Command Handlers ==========
    pub create_draft_handler: CreateDraftHandler,
    pub update_draft_handler: UpdateDraftFieldsHandler,
    pub select_voice_handler: SelectVoiceHandler,
    pub generate_audio_handler: GenerateAudioHandler,
    pub generate_thumbnail_handler: GenerateThumbnailHandler,
    pub submit_draft_handler: SubmitDraftHandler,
    pub discard_draft_handler: DiscardDraftHandler,
    pub upsert_user_handler: UpsertUserHandler,

    // ========== Query Handlers ==========
    pub get_draft_handler: GetDraftHandler,
    pub get_podcast_handler: GetPodcastHandler,
    pub get_creator_profile_handler: GetCreatorProfileHandler,
    pub get_top_creators_handler: GetTopCreatorsHandler,
    pub list_voice_types_handler: ListVoiceTypesHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(ports: AppPorts, voice_previews: VoicePreviewConfig) -> Self {
        let AppPorts {
            draft_manager,
            podcast_repo,
            user_repo,
            speech_engine,
            image_engine,
            audio_probe,
            blob_storage,
            ranking,
            event_publisher,
        } = ports;

        Self {
            // Command handlers
            create_draft_handler: CreateDraftHandler::new(draft_manager.clone()),
            update_draft_handler: UpdateDraftFieldsHandler::new(draft_manager.clone()),
            select_voice_handler: SelectVoiceHandler::new(draft_manager.clone()),
            generate_audio_handler: GenerateAudioHandler::new(
                draft_manager.clone(),
                speech_engine,
                audio_probe,
                blob_storage.clone(),
            ),
            generate_thumbnail_handler: GenerateThumbnailHandler::new(
                draft_manager.clone(),
                image_engine,
                blob_storage.clone(),
            ),
            submit_draft_handler: SubmitDraftHandler::new(
                draft_manager.clone(),
                podcast_repo.clone(),
                user_repo.clone(),
                event_publisher.clone(),
            ),
            discard_draft_handler: DiscardDraftHandler::new(
                draft_manager.clone(),
                blob_storage.clone(),
                event_publisher.clone(),
            ),
            upsert_user_handler: UpsertUserHandler::new(user_repo.clone(), event_publisher.clone()),

            // Query handlers
            get_draft_handler: GetDraftHandler::new(draft_manager.clone()),
            get_podcast_handler: GetPodcastHandler::new(podcast_repo.clone()),
            get_creator_profile_handler: GetCreatorProfileHandler::new(user_repo.clone(), podcast_repo),
            get_top_creators_handler: GetTopCreatorsHandler::new(ranking, user_repo),
            list_voice_types_handler: ListVoiceTypesHandler::new(),

            // Ports
            draft_manager,
            blob_storage,
            event_publisher,
            voice_previews,
        }
    }
}
