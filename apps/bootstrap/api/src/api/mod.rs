//! Route table.
//!
//! Handlers are collected in [`routes`]; [`router`] mounts them on the engine
//! and puts the request-logging middleware around the whole stack, so
//! recovered panics and unmatched paths get their request line too.
//! Merge additional routers into [`routes`] to extend the service.

use axum::{Router, middleware};
use axum_helpers::http::request_logger;
use axum_helpers::server::create_engine;
use core_config::EngineOptions;

pub mod ping;

pub fn routes() -> Router {
    Router::new().merge(ping::router())
}

pub fn router(options: &EngineOptions) -> Router {
    create_engine(routes(), options).layer(middleware::from_fn(request_logger))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_wrong_method_is_json_405() {
        let response = router(&EngineOptions::default())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/ping")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "METHOD_NOT_ALLOWED");
        assert_eq!(body["code"], 1005);
    }
}
