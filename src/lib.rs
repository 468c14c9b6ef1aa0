//! Podcastr - AI 播客创作服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Podcast Context: 草稿、提交状态机、发布请求
//! - Creator Context: 创作者排行面板
//!
//! 应用层 (application/):
//! - Ports: DraftManager, SpeechEngine, ImageEngine, AudioProbe, BlobStorage, Repositories, RankingSnapshot
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + WebSocket
//! - Memory: 草稿管理内存实现
//! - Worker: 排行刷新、草稿回收
//! - Persistence: SQLite 存储
//! - Adapters: 语音/图像客户端、时长探测、文件存储
//! - Events: WebSocket 事件发布

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
