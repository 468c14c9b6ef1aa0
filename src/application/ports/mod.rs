//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_probe;
mod blob_storage;
mod draft_manager;
mod image_engine;
mod ranking;
mod repositories;
mod speech_engine;

pub use audio_probe::{AudioProbePort, ProbeError};
pub use blob_storage::{BlobData, BlobStorageError, BlobStoragePort, StoredBlob};
pub use draft_manager::{DraftFieldsPatch, DraftManagerPort, DraftStoreError};
pub use image_engine::{ImageEnginePort, ImageError, ImageRequest, ImageResponse};
pub use ranking::RankingSnapshotPort;
pub use repositories::{
    PodcastRecord, PodcastRepositoryPort, RepositoryError, TopCreatorRecord, UserRecord,
    UserRepositoryPort,
};
pub use speech_engine::{SpeechEnginePort, SpeechError, SpeechRequest, SpeechResponse};
