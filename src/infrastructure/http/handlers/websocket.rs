//! WebSocket Handlers
//!
//! - /ws/draft/{id}: 草稿作者收到的提示（"Podcast created"、"Error" 等）
//! - /ws/events: 全局事件（发布、用户同步、排行刷新）

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::{IntoResponse, Response},
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::application::GetDraft;
use crate::domain::podcast::DraftId;
use crate::infrastructure::events::WsEvent;
use crate::infrastructure::http::auth::CurrentUser;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 草稿 WebSocket，握手前校验草稿归属
pub async fn draft_websocket_handler(
    ws: WebSocketUpgrade,
    Path(draft_id): Path<Uuid>,
    user: CurrentUser,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let draft_id = DraftId::from_uuid(draft_id);
    state.get_draft_handler.handle(GetDraft {
        draft_id,
        author_ref: user.identity_ref,
    })?;

    Ok(ws
        .on_upgrade(move |socket| handle_draft_socket(socket, draft_id, state))
        .into_response())
}

/// 全局 WebSocket
pub async fn global_websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_global_socket(socket, state))
}

async fn handle_draft_socket(socket: WebSocket, draft_id: DraftId, state: Arc<AppState>) {
    let event_rx = state.event_publisher.register_draft(draft_id);

    tracing::info!(draft_id = %draft_id, "Draft WebSocket connected");

    pump(socket, event_rx, |_| true).await;

    // 草稿已发布或丢弃时通道早已移除，这里只清理无人订阅的通道
    state.event_publisher.release_draft(draft_id);
    tracing::info!(draft_id = %draft_id, "Draft WebSocket disconnected");
}

async fn handle_global_socket(socket: WebSocket, state: Arc<AppState>) {
    let event_rx = state.event_publisher.subscribe_global();

    tracing::info!("Global WebSocket connected");

    pump(socket, event_rx, |event| {
        matches!(
            event,
            WsEvent::PodcastCreated { .. }
                | WsEvent::UserUpserted { .. }
                | WsEvent::RankingUpdated { .. }
        )
    })
    .await;

    tracing::info!("Global WebSocket disconnected");
}

/// 转发事件直到任一方向结束，返回时订阅已释放
async fn pump<F>(socket: WebSocket, mut event_rx: broadcast::Receiver<WsEvent>, filter: F)
where
    F: Fn(&WsEvent) -> bool,
{
    let (mut sender, mut receiver) = socket.split();

    let forward = async move {
        loop {
            let event = match event_rx.recv().await {
                Ok(event) => event,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped = skipped, "WebSocket subscriber lagged");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => break,
            };
            if !filter(&event) {
                continue;
            }

            let msg = match serde_json::to_string(&event) {
                Ok(json) => Message::Text(json),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize event");
                    continue;
                }
            };

            if let Err(e) = sender.send(msg).await {
                tracing::debug!(error = %e, "Failed to send WebSocket message");
                break;
            }
        }
        let _ = sender.close().await;
    };

    // 接收客户端消息（心跳由 axum 自动回复）
    let receive = async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => {
                    tracing::debug!("WebSocket closed by client");
                    break;
                }
                Err(e) => {
                    tracing::debug!(error = %e, "WebSocket error");
                    break;
                }
                _ => {}
            }
        }
    };

    tokio::select! {
        _ = forward => {}
        _ = receive => {}
    }
}
