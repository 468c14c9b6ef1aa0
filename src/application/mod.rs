//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（SpeechEngine、ImageEngine、Repository、DraftManager 等）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports
pub use commands::{
    // Draft commands
    CreateDraft,
    DiscardDraft,
    GenerateAudio,
    GenerateThumbnail,
    SelectVoice,
    SubmitDraft,
    UpdateDraftFields,
    // User commands
    UpsertUser,
    // Handlers
    handlers::{
        CreateDraftHandler, DiscardDraftHandler, GenerateAudioHandler, GenerateAudioResponse,
        GenerateThumbnailHandler, GenerateThumbnailResponse, SelectVoiceHandler,
        SelectVoiceResponse, SubmitDraftHandler, SubmitDraftResponse, UpdateDraftFieldsHandler,
        UpsertUserHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Audio probe
    AudioProbePort,
    ProbeError,
    // Blob storage
    BlobData,
    BlobStorageError,
    BlobStoragePort,
    StoredBlob,
    // Draft manager
    DraftFieldsPatch,
    DraftManagerPort,
    DraftStoreError,
    // Image engine
    ImageEnginePort,
    ImageError,
    ImageRequest,
    ImageResponse,
    // Ranking
    RankingSnapshotPort,
    // Repositories
    PodcastRecord,
    PodcastRepositoryPort,
    RepositoryError,
    TopCreatorRecord,
    UserRecord,
    UserRepositoryPort,
    // Speech engine
    SpeechEnginePort,
    SpeechError,
    SpeechRequest,
    SpeechResponse,
};

pub use queries::{
    // Draft queries
    GetDraft,
    // Podcast queries
    GetCreatorProfile,
    GetPodcast,
    // Ranking queries
    GetTopCreators,
    // Voice queries
    ListVoiceTypes,
    // Handlers
    handlers::{
        CreatorProfileResponse, DraftResponse, GetCreatorProfileHandler, GetDraftHandler,
        GetPodcastHandler, GetTopCreatorsHandler, ListVoiceTypesHandler, PodcastResponse,
        VoiceTypeResponse,
    },
};
