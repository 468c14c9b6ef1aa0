//! HTTP Middleware
//!
//! 4xx/5xx 响应日志。业务错误（errno != 0）由 `ApiError::into_response` 记录。

use axum::{extract::Request, middleware::Next, response::Response};

use super::auth::IDENTITY_HEADER;

/// 记录 HTTP 层错误，附带请求方的身份引用
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let identity_ref = request
        .headers()
        .get(IDENTITY_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let response = next.run(request).await;
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            identity_ref = %identity_ref,
            status = status.as_u16(),
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            identity_ref = %identity_ref,
            status = status.as_u16(),
            "HTTP client error"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::{get, post},
        Json, Router,
    };
    use tower::util::ServiceExt;

    #[derive(serde::Deserialize)]
    struct Payload {
        #[allow(dead_code)]
        draft_id: uuid::Uuid,
    }

    async fn accept(Json(_): Json<Payload>) -> &'static str {
        "OK"
    }

    async fn broken() -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn router() -> Router {
        Router::new()
            .route("/api/draft/get", post(accept))
            .route("/api/broken", get(broken))
            .layer(axum::middleware::from_fn(error_logging_middleware))
    }

    #[tokio::test]
    async fn test_passes_successful_responses_through() {
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/api/draft/get")
            .header("content-type", "application/json")
            .header("X-Identity-Ref", "clerk_abc")
            .body(Body::from(r#"{"draft_id":"67e55044-10b1-426f-9247-bb680e5fe0c8"}"#))
            .unwrap();

        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_body_keeps_client_error_status() {
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/api/draft/get")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = router().oneshot(request).await.unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_server_error_status_is_preserved() {
        let request = HttpRequest::builder()
            .uri("/api/broken")
            .body(Body::empty())
            .unwrap();

        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
