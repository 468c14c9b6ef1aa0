//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, EngineProvider};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// # 环境变量示例
/// - `PODCASTR_SERVER__PORT=8080`
/// - `PODCASTR_SPEECH__URL=http://tts-gateway:8000/v1`
/// - `PODCASTR_SPEECH__API_KEY=sk-...`
/// - `PODCASTR_IMAGE__PROVIDER=fake`
/// - `PODCASTR_DATABASE__PATH=/data/podcastr.db`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// `config_path` 为 None 时搜索工作目录下的 config.toml / config.local.toml
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5060)?
        .set_default("speech.provider", "http")?
        .set_default("speech.url", "https://api.openai.com/v1")?
        .set_default("speech.model", "tts-1")?
        .set_default("speech.response_format", "mp3")?
        .set_default("speech.timeout_secs", 120)?
        .set_default("image.provider", "http")?
        .set_default("image.url", "https://api.openai.com/v1")?
        .set_default("image.model", "dall-e-3")?
        .set_default("image.size", "1024x1024")?
        .set_default("image.timeout_secs", 120)?
        .set_default("database.path", "data/podcastr.db")?
        .set_default("database.max_connections", 5)?
        .set_default("storage.blob_dir", "data/storage")?
        .set_default("storage.voices_dir", "data/voices")?
        .set_default("storage.preview_extension", "mp3")?
        .set_default("storage.max_size_bytes", 0)?
        .set_default("storage.max_upload_size", 10 * 1024 * 1024)?
        .set_default("gc.enabled", true)?
        .set_default("gc.interval_secs", 600)?
        .set_default("gc.draft_expire_secs", 86400)?
        .set_default("ranking.refresh_interval_secs", 300)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 层级分隔符为双下划线，变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix("PODCASTR")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 时长探测支持的语音输出格式
const SUPPORTED_SPEECH_FORMATS: [&str; 2] = ["mp3", "wav"];

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.speech.provider == EngineProvider::Http && config.speech.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Speech URL cannot be empty".to_string(),
        ));
    }

    if config.image.provider == EngineProvider::Http && config.image.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Image URL cannot be empty".to_string(),
        ));
    }

    if !SUPPORTED_SPEECH_FORMATS.contains(&config.speech.response_format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "Unsupported speech response format '{}', expected one of {:?}",
            config.speech.response_format, SUPPORTED_SPEECH_FORMATS
        )));
    }

    if config.database.path.is_empty() {
        return Err(ConfigError::ValidationError(
            "Database path cannot be empty".to_string(),
        ));
    }

    if config.storage.preview_extension.trim_start_matches('.').is_empty() {
        return Err(ConfigError::ValidationError(
            "Voice preview extension cannot be empty".to_string(),
        ));
    }

    if config.gc.enabled && config.gc.interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "GC interval cannot be 0 when GC is enabled".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Public Base URL: {}", config.server.public_base_url());
    tracing::info!(
        "Speech: {:?} {} (model {}, format {})",
        config.speech.provider,
        config.speech.url,
        config.speech.model,
        config.speech.response_format
    );
    tracing::info!(
        "Image: {:?} {} (model {}, size {})",
        config.image.provider,
        config.image.url,
        config.image.model,
        config.image.size
    );
    tracing::info!("Database: {}", config.database.path);
    tracing::info!("Database Max Connections: {}", config.database.max_connections);
    tracing::info!("Blob Directory: {:?}", config.storage.blob_dir);
    tracing::info!(
        "Voice Previews: {:?} (*.{})",
        config.storage.voices_dir,
        config.storage.preview_extension
    );
    tracing::info!("Ranking Refresh: {}s", config.ranking.refresh_interval_secs);
    tracing::info!("GC Enabled: {}", config.gc.enabled);
    if config.gc.enabled {
        tracing::info!("GC Interval: {}s", config.gc.interval_secs);
        tracing::info!("Draft Expire: {}s", config.gc.draft_expire_secs);
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
