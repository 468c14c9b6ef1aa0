//! File Blob Storage - 文件系统 Blob 存储实现
//!
//! 实现 BlobStoragePort trait，文件布局为 `{base_dir}/{storage_id}.{ext}`

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{BlobData, BlobStorageError, BlobStoragePort, StoredBlob};
use crate::domain::podcast::StorageId;

/// 已知的 MIME 类型与扩展名
const KNOWN_TYPES: [(&str, &str); 6] = [
    ("audio/mpeg", "mp3"),
    ("audio/wav", "wav"),
    ("image/png", "png"),
    ("image/jpeg", "jpg"),
    ("image/webp", "webp"),
    ("application/octet-stream", "bin"),
];

fn extension_for(content_type: &str) -> &'static str {
    KNOWN_TYPES
        .iter()
        .find(|(mime, _)| *mime == content_type)
        .map(|(_, ext)| *ext)
        .unwrap_or("bin")
}

fn content_type_for(extension: &str) -> &'static str {
    KNOWN_TYPES
        .iter()
        .find(|(_, ext)| *ext == extension)
        .map(|(mime, _)| *mime)
        .unwrap_or("application/octet-stream")
}

/// 文件系统 Blob 存储
pub struct FileBlobStorage {
    /// 存储根目录
    base_dir: PathBuf,
    /// 对外访问的 Base URL
    public_base_url: String,
    /// 容量上限（字节），0 表示不限制
    max_bytes: u64,
}

impl FileBlobStorage {
    /// 创建新的文件存储
    pub async fn new(
        base_dir: impl AsRef<Path>,
        public_base_url: impl Into<String>,
    ) -> Result<Self, BlobStorageError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        // 确保目录存在
        fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| BlobStorageError::IoError(e.to_string()))?;

        Ok(Self {
            base_dir,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            max_bytes: 0,
        })
    }

    pub fn with_limit(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// 获取存储根目录
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// 查找已存在的文件（扩展名未知）
    async fn locate(&self, storage_id: StorageId) -> Result<Option<PathBuf>, BlobStorageError> {
        for (_, ext) in KNOWN_TYPES.iter() {
            let path = self.base_dir.join(format!("{}.{}", storage_id, ext));
            if fs::try_exists(&path)
                .await
                .map_err(|e| BlobStorageError::IoError(e.to_string()))?
            {
                return Ok(Some(path));
            }
        }
        Ok(None)
    }

    async fn used_bytes(&self) -> Result<u64, BlobStorageError> {
        let mut used = 0u64;
        let mut entries = fs::read_dir(&self.base_dir)
            .await
            .map_err(|e| BlobStorageError::IoError(e.to_string()))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| BlobStorageError::IoError(e.to_string()))?
        {
            if let Ok(metadata) = entry.metadata().await {
                if metadata.is_file() {
                    used += metadata.len();
                }
            }
        }
        Ok(used)
    }
}

#[async_trait]
impl BlobStoragePort for FileBlobStorage {
    async fn save(&self, data: &[u8], content_type: &str) -> Result<StoredBlob, BlobStorageError> {
        if self.max_bytes > 0 {
            let used = self.used_bytes().await?;
            if used + data.len() as u64 > self.max_bytes {
                return Err(BlobStorageError::StorageFull {
                    used,
                    limit: self.max_bytes,
                });
            }
        }

        let storage_id = StorageId::new();
        let path = self
            .base_dir
            .join(format!("{}.{}", storage_id, extension_for(content_type)));

        fs::write(&path, data)
            .await
            .map_err(|e| BlobStorageError::IoError(e.to_string()))?;

        tracing::debug!(
            storage_id = %storage_id,
            content_type = %content_type,
            size = data.len(),
            "Saved blob"
        );

        Ok(StoredBlob {
            storage_id,
            url: self.url_for(storage_id),
            size: data.len() as u64,
        })
    }

    async fn read(&self, storage_id: StorageId) -> Result<BlobData, BlobStorageError> {
        let path = self
            .locate(storage_id)
            .await?
            .ok_or_else(|| BlobStorageError::NotFound(storage_id.to_string()))?;

        let content_type = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(content_type_for)
            .unwrap_or("application/octet-stream")
            .to_string();

        let data = fs::read(&path)
            .await
            .map_err(|e| BlobStorageError::IoError(e.to_string()))?;

        Ok(BlobData { data, content_type })
    }

    async fn delete(&self, storage_id: StorageId) -> Result<(), BlobStorageError> {
        if let Some(path) = self.locate(storage_id).await? {
            fs::remove_file(&path)
                .await
                .map_err(|e| BlobStorageError::IoError(e.to_string()))?;
            tracing::debug!(storage_id = %storage_id, "Deleted blob");
        }
        Ok(())
    }

    fn url_for(&self, storage_id: StorageId) -> String {
        format!("{}/api/storage/{}", self.public_base_url, storage_id)
    }
}
