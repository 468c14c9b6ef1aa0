//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                       GET   健康检查
//! - /api/user/upsert                POST  同步用户资料（身份提供方回调）
//! - /api/user/top                   GET   排行面板
//! - /api/user/profile               POST  创作者主页
//! - /api/voice/list                 GET   音色选项
//! - /api/voice/preview/{voice}      GET   音色试听样本
//! - /api/draft/create               POST  新建草稿
//! - /api/draft/get                  POST  草稿快照
//! - /api/draft/update               POST  修改标题/简介/提示词
//! - /api/draft/select_voice         POST  选择音色
//! - /api/draft/generate_audio       POST  生成旁白音频
//! - /api/draft/generate_thumbnail   POST  生成封面
//! - /api/draft/submit               POST  提交发布
//! - /api/draft/discard              POST  丢弃草稿
//! - /api/podcast/get                POST  播客详情
//! - /api/storage/{id}               GET   读取生成的音频或封面
//! - /ws/draft/{id}                  WS    草稿提示
//! - /ws/events                      WS    全局事件（发布、用户、排行）

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .route("/ws/draft/:draft_id", get(handlers::draft_websocket_handler))
        .route("/ws/events", get(handlers::global_websocket_handler))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/user", user_routes())
        .nest("/voice", voice_routes())
        .nest("/draft", draft_routes())
        .route("/podcast/get", post(handlers::get_podcast))
        .route("/storage/:storage_id", get(handlers::download_blob))
}

fn user_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/upsert", post(handlers::upsert_user))
        .route("/top", get(handlers::top_creators))
        .route("/profile", post(handlers::creator_profile))
}

fn voice_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/list", get(handlers::list_voice_types))
        .route("/preview/:voice_type", get(handlers::voice_preview))
}

/// Draft 路由
fn draft_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create", post(handlers::create_draft))
        .route("/get", post(handlers::get_draft))
        .route("/update", post(handlers::update_draft))
        .route("/select_voice", post(handlers::select_voice))
        .route("/generate_audio", post(handlers::generate_audio))
        .route("/generate_thumbnail", post(handlers::generate_thumbnail))
        .route("/submit", post(handlers::submit_draft))
        .route("/discard", post(handlers::discard_draft))
}
