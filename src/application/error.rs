//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;
use uuid::Uuid;

use crate::application::ports::{
    BlobStorageError, DraftStoreError, ImageError, ProbeError, RepositoryError, SpeechError,
};
use crate::domain::podcast::DraftError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 并发冲突（如重复提交）
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 状态无效
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// 仓储错误
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// 外部服务错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: Uuid) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// 创建 NotFound 错误（使用字符串 ID）
    pub fn not_found_str(resource_type: &'static str, id: &str) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        Self::RepositoryError(err.to_string())
    }
}

impl From<DraftError> for ApplicationError {
    fn from(err: DraftError) -> Self {
        match err {
            DraftError::AlreadySubmitting | DraftError::AlreadyPublished => {
                Self::Conflict(err.to_string())
            }
            DraftError::InvalidTransition(_) => Self::InvalidState(err.to_string()),
            DraftError::InvalidTitle(_)
            | DraftError::InvalidDescription(_)
            | DraftError::MissingAssets { .. }
            | DraftError::MissingPrompt(_)
            | DraftError::VoiceNotSelected => Self::ValidationError(err.to_string()),
        }
    }
}

impl From<DraftStoreError> for ApplicationError {
    fn from(err: DraftStoreError) -> Self {
        match err {
            DraftStoreError::NotFound(id) => Self::not_found("Draft", *id.as_uuid()),
            DraftStoreError::AlreadyExists(_) => Self::Conflict(err.to_string()),
            DraftStoreError::Rejected(e) => e.into(),
        }
    }
}

impl From<SpeechError> for ApplicationError {
    fn from(err: SpeechError) -> Self {
        Self::ExternalServiceError(format!("speech synthesis failed: {}", err))
    }
}

impl From<ImageError> for ApplicationError {
    fn from(err: ImageError) -> Self {
        Self::ExternalServiceError(format!("image generation failed: {}", err))
    }
}

impl From<BlobStorageError> for ApplicationError {
    fn from(err: BlobStorageError) -> Self {
        match err {
            BlobStorageError::NotFound(id) => Self::not_found_str("Blob", &id),
            _ => Self::StorageError(err.to_string()),
        }
    }
}

impl From<ProbeError> for ApplicationError {
    fn from(err: ProbeError) -> Self {
        Self::ExternalServiceError(format!("generated audio is unreadable: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::podcast::DraftId;

    #[test]
    fn test_draft_error_mapping() {
        let err: ApplicationError = DraftError::AlreadySubmitting.into();
        assert!(matches!(err, ApplicationError::Conflict(_)));

        let err: ApplicationError = DraftError::MissingAssets {
            missing: vec!["audio"],
        }
        .into();
        match err {
            ApplicationError::ValidationError(msg) => {
                assert_eq!(msg, "Please generate audio and image")
            }
            other => panic!("unexpected: {:?}", other),
        }

        let err: ApplicationError = DraftStoreError::NotFound(DraftId::new()).into();
        assert!(matches!(err, ApplicationError::NotFound { resource_type: "Draft", .. }));
    }
}
