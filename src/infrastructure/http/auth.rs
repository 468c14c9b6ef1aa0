//! Request Identity
//!
//! 身份由上游身份提供方确定，本服务只读取请求携带的身份引用。

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use super::error::ApiError;

/// 身份引用请求头
pub const IDENTITY_HEADER: &str = "x-identity-ref";

/// 当前请求的用户
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub identity_ref: String,
}

#[derive(Debug, Deserialize)]
struct IdentityQuery {
    identity_ref: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let from_header = parts
            .headers
            .get(IDENTITY_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim().to_string());

        // 浏览器无法为 WebSocket 握手设置请求头，退回到查询参数
        let identity_ref = match from_header {
            Some(value) => Some(value),
            None => Query::<IdentityQuery>::try_from_uri(&parts.uri)
                .ok()
                .and_then(|Query(q)| q.identity_ref),
        };

        match identity_ref {
            Some(identity_ref) if !identity_ref.is_empty() => Ok(CurrentUser { identity_ref }),
            _ => Err(ApiError::BadRequest(format!(
                "Missing {} header",
                IDENTITY_HEADER
            ))),
        }
    }
}
