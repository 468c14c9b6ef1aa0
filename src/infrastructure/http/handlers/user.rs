//! User Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{GetCreatorProfile, GetTopCreators, UpsertUser};
use crate::domain::creator::PanelView;
use crate::infrastructure::http::auth::CurrentUser;
use crate::infrastructure::http::dto::{
    ApiResponse, CreatorProfileDto, GetProfileRequest, UpsertUserRequest, UserDto,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 身份提供方的用户同步回调
pub async fn upsert_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpsertUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let cmd = UpsertUser {
        identity_ref: req.identity_ref,
        name: req.name,
        email: req.email,
        image_url: req.image_url,
    };

    let user = state.upsert_user_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(user.into())))
}

/// 排行面板，首次计算完成前返回 `{"state": "loading"}`
///
/// 身份可选，带上时面板包含访问者自己的主页入口
pub async fn top_creators(
    user: Option<CurrentUser>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<PanelView>>, ApiError> {
    let query = GetTopCreators {
        viewer_ref: user.map(|u| u.identity_ref),
    };

    let view = state.get_top_creators_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(view)))
}

pub async fn creator_profile(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GetProfileRequest>,
) -> Result<Json<ApiResponse<CreatorProfileDto>>, ApiError> {
    let query = GetCreatorProfile {
        identity_ref: req.identity_ref,
    };

    let profile = state.get_creator_profile_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(profile.into())))
}
