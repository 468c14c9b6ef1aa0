//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 语音合成配置
    #[serde(default)]
    pub speech: SpeechConfig,

    /// 封面生成配置
    #[serde(default)]
    pub image: ImageConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 草稿回收配置
    #[serde(default)]
    pub gc: GcConfig,

    /// 排行刷新配置
    #[serde(default)]
    pub ranking: RankingConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 公开访问的 Base URL，生成的音频与封面地址以此为前缀
    /// 如果未设置，则使用 http://{host}:{port}
    #[serde(default)]
    pub base_url: Option<String>,

    /// 静态文件服务配置
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

/// 静态文件服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,

    /// URL 路径前缀（如 "/" 表示根路径托管）
    #[serde(default = "default_static_path")]
    pub path: String,
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("web")
}

fn default_static_path() -> String {
    "/".to_string()
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: default_static_dir(),
            path: default_static_path(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5060
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 获取公开的 Base URL
    pub fn public_base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| {
            let host = if self.host == "0.0.0.0" {
                "localhost"
            } else {
                &self.host
            };
            format!("http://{}:{}", host, self.port)
        })
    }
}

/// 生成引擎的实现选择
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineProvider {
    /// OpenAI 兼容的 HTTP 服务
    #[default]
    Http,
    /// 本地假实现，离线开发用
    Fake,
}

/// 语音合成配置
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    #[serde(default)]
    pub provider: EngineProvider,

    /// 服务基础 URL（包含 /v1）
    #[serde(default = "default_engine_url")]
    pub url: String,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_speech_model")]
    pub model: String,

    /// 返回的音频格式
    #[serde(default = "default_response_format")]
    pub response_format: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_engine_timeout")]
    pub timeout_secs: u64,
}

fn default_engine_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_speech_model() -> String {
    "tts-1".to_string()
}

fn default_response_format() -> String {
    "mp3".to_string()
}

fn default_engine_timeout() -> u64 {
    120
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            provider: EngineProvider::default(),
            url: default_engine_url(),
            api_key: None,
            model: default_speech_model(),
            response_format: default_response_format(),
            timeout_secs: default_engine_timeout(),
        }
    }
}

/// 封面生成配置
#[derive(Debug, Clone, Deserialize)]
pub struct ImageConfig {
    #[serde(default)]
    pub provider: EngineProvider,

    #[serde(default = "default_engine_url")]
    pub url: String,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_image_model")]
    pub model: String,

    /// 图像尺寸，如 1024x1024
    #[serde(default = "default_image_size")]
    pub size: String,

    #[serde(default = "default_engine_timeout")]
    pub timeout_secs: u64,
}

fn default_image_model() -> String {
    "dall-e-3".to_string()
}

fn default_image_size() -> String {
    "1024x1024".to_string()
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            provider: EngineProvider::default(),
            url: default_engine_url(),
            api_key: None,
            model: default_image_model(),
            size: default_image_size(),
            timeout_secs: default_engine_timeout(),
        }
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/podcastr.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// 获取数据库 URL
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path)
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 生成的音频与封面存储目录
    #[serde(default = "default_blob_dir")]
    pub blob_dir: PathBuf,

    /// 音色试听样本目录
    #[serde(default = "default_voices_dir")]
    pub voices_dir: PathBuf,

    /// 试听样本扩展名
    #[serde(default = "default_preview_extension")]
    pub preview_extension: String,

    /// 最大存储空间（字节），0 表示不限制
    #[serde(default)]
    pub max_size_bytes: u64,

    /// 请求体最大大小（字节），默认 10MB
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: u64,
}

fn default_blob_dir() -> PathBuf {
    PathBuf::from("data/storage")
}

fn default_voices_dir() -> PathBuf {
    PathBuf::from("data/voices")
}

fn default_preview_extension() -> String {
    "mp3".to_string()
}

fn default_max_upload_size() -> u64 {
    10 * 1024 * 1024 // 10 MB
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            blob_dir: default_blob_dir(),
            voices_dir: default_voices_dir(),
            preview_extension: default_preview_extension(),
            max_size_bytes: 0,
            max_upload_size: default_max_upload_size(),
        }
    }
}

/// 草稿回收配置
#[derive(Debug, Clone, Deserialize)]
pub struct GcConfig {
    /// 是否启用自动回收
    #[serde(default = "default_gc_enabled")]
    pub enabled: bool,

    /// 扫描间隔（秒）
    #[serde(default = "default_gc_interval")]
    pub interval_secs: u64,

    /// 草稿闲置过期时间（秒）
    #[serde(default = "default_draft_expire")]
    pub draft_expire_secs: u64,
}

fn default_gc_enabled() -> bool {
    true
}

fn default_gc_interval() -> u64 {
    600
}

fn default_draft_expire() -> u64 {
    86400 // 24 小时
}

impl Default for GcConfig {
    fn default() -> Self {
        Self {
            enabled: default_gc_enabled(),
            interval_secs: default_gc_interval(),
            draft_expire_secs: default_draft_expire(),
        }
    }
}

/// 排行刷新配置
#[derive(Debug, Clone, Deserialize)]
pub struct RankingConfig {
    /// 周期刷新间隔（秒），0 表示只在事件触发时刷新
    #[serde(default = "default_ranking_interval")]
    pub refresh_interval_secs: u64,
}

fn default_ranking_interval() -> u64 {
    300
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_ranking_interval(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
