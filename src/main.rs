//! Podcastr - AI 播客创作服务
//!
//! - Domain: podcast/, creator/
//! - Application: commands, queries, ports
//! - Infrastructure: http, memory, worker, persistence, adapters, events

use std::sync::Arc;

use podcastr::application::{ImageEnginePort, SpeechEnginePort};
use podcastr::config::{load_config, print_config, AppConfig, EngineProvider};
use podcastr::infrastructure::adapters::{
    FakeImageClient, FakeSpeechClient, FileBlobStorage, HttpImageClient, HttpImageClientConfig,
    HttpSpeechClient, HttpSpeechClientConfig, SymphoniaProbe,
};
use podcastr::infrastructure::events::EventPublisher;
use podcastr::infrastructure::http::{
    AppPorts, AppState, HttpServer, ServerOptions, VoicePreviewConfig,
};
use podcastr::infrastructure::memory::InMemoryDraftManager;
use podcastr::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqlitePodcastRepository, SqliteUserRepository,
};
use podcastr::infrastructure::worker::{
    DraftGcConfig, DraftGcWorker, RankingWorker, RankingWorkerConfig,
};

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},podcastr={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn speech_engine(config: &AppConfig) -> anyhow::Result<Arc<dyn SpeechEnginePort>> {
    let speech = &config.speech;
    Ok(match speech.provider {
        EngineProvider::Http => {
            let client_config = HttpSpeechClientConfig {
                base_url: speech.url.clone(),
                api_key: speech.api_key.clone(),
                model: speech.model.clone(),
                response_format: speech.response_format.clone(),
                timeout_secs: speech.timeout_secs,
            };
            Arc::new(HttpSpeechClient::new(client_config)?)
        }
        EngineProvider::Fake => {
            tracing::warn!("Using fake speech engine, generated audio is silence");
            Arc::new(FakeSpeechClient::with_defaults())
        }
    })
}

fn image_engine(config: &AppConfig) -> anyhow::Result<Arc<dyn ImageEnginePort>> {
    let image = &config.image;
    Ok(match image.provider {
        EngineProvider::Http => {
            let client_config = HttpImageClientConfig {
                base_url: image.url.clone(),
                api_key: image.api_key.clone(),
                model: image.model.clone(),
                size: image.size.clone(),
                timeout_secs: image.timeout_secs,
            };
            Arc::new(HttpImageClient::new(client_config)?)
        }
        EngineProvider::Fake => {
            tracing::warn!("Using fake image engine, thumbnails are placeholders");
            Arc::new(FakeImageClient::new())
        }
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Podcastr {}", env!("CARGO_PKG_VERSION"));
    print_config(&config);

    // 确保数据目录存在
    tokio::fs::create_dir_all(&config.storage.voices_dir).await?;
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    let podcast_repo = Arc::new(SqlitePodcastRepository::new(pool.clone()));
    let user_repo = Arc::new(SqliteUserRepository::new(pool));

    // 生成引擎
    let speech_engine = speech_engine(&config)?;
    if !speech_engine.health_check().await {
        tracing::warn!(url = %config.speech.url, "Speech engine is not reachable yet");
    }
    let image_engine = image_engine(&config)?;

    // 生成结果存储
    let blob_storage = Arc::new(
        FileBlobStorage::new(&config.storage.blob_dir, config.server.public_base_url())
            .await?
            .with_limit(config.storage.max_size_bytes),
    );

    let event_publisher = EventPublisher::new().arc();
    let draft_manager = Arc::new(InMemoryDraftManager::new());

    // 排行 Worker
    let (ranking_worker, ranking_snapshot) = RankingWorker::new(
        RankingWorkerConfig {
            refresh_interval_secs: config.ranking.refresh_interval_secs,
        },
        user_repo.clone(),
        event_publisher.clone(),
    );
    tokio::spawn(ranking_worker.run());

    // 草稿回收 Worker
    if config.gc.enabled {
        let gc_worker = DraftGcWorker::new(
            DraftGcConfig {
                interval_secs: config.gc.interval_secs,
                draft_expire_secs: config.gc.draft_expire_secs,
            },
            draft_manager.clone(),
            blob_storage.clone(),
            event_publisher.clone(),
        );
        tokio::spawn(gc_worker.run());
    }

    let state = AppState::new(
        AppPorts {
            draft_manager,
            podcast_repo,
            user_repo,
            speech_engine,
            image_engine,
            audio_probe: Arc::new(SymphoniaProbe::new()),
            blob_storage,
            ranking: Arc::new(ranking_snapshot),
            event_publisher,
        },
        VoicePreviewConfig {
            voices_dir: config.storage.voices_dir.clone(),
            extension: config.storage.preview_extension.clone(),
        },
    );

    let mut options = ServerOptions::new(&config.server.host, config.server.port)
        .with_body_limit(config.storage.max_upload_size as usize);
    if config.server.static_files.enabled {
        options = options.with_static_files(
            config.server.static_files.dir.clone(),
            config.server.static_files.path.clone(),
        );
    }

    let server = HttpServer::new(options, state);

    server.run_with_shutdown(shutdown_signal()).await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
