//! Storage Adapter - 文件系统 Blob 存储

mod file_storage;

pub use file_storage::FileBlobStorage;
