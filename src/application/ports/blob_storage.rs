//! Blob Storage Port - 出站端口
//!
//! 生成的音频与封面的存储抽象。存储句柄与可访问 URL 分离。

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::podcast::StorageId;

/// Blob 存储错误
#[derive(Debug, Error)]
pub enum BlobStorageError {
    #[error("Blob not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Storage full: used {used} bytes, limit {limit} bytes")]
    StorageFull { used: u64, limit: u64 },
}

/// 已保存的对象
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub storage_id: StorageId,
    pub url: String,
    pub size: u64,
}

/// 读取到的对象
#[derive(Debug, Clone)]
pub struct BlobData {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// Blob Storage Port
#[async_trait]
pub trait BlobStoragePort: Send + Sync {
    /// 保存数据，返回新的存储句柄与访问 URL
    async fn save(&self, data: &[u8], content_type: &str) -> Result<StoredBlob, BlobStorageError>;

    /// 读取数据
    async fn read(&self, storage_id: StorageId) -> Result<BlobData, BlobStorageError>;

    /// 删除数据
    async fn delete(&self, storage_id: StorageId) -> Result<(), BlobStorageError>;

    /// 存储句柄对应的访问 URL
    fn url_for(&self, storage_id: StorageId) -> String;
}
