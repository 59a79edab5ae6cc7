pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::analysis::handlers as analysis;
use crate::catalog::handlers as catalog;
use crate::chat::handlers as chat;
use crate::dashboard::handlers as dashboard;
use crate::resumes::handlers as resumes;
use crate::resumes::service::MAX_UPLOAD_BYTES;
use crate::state::AppState;

/// `?user_id=` on list endpoints.
#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// Room for multipart framing and the `user_id` field around the file.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resumes
        .route(
            "/api/v1/resumes",
            post(resumes::handle_upload_resume)
                .layer(DefaultBodyLimit::max(
                    MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD_BYTES,
                ))
                .get(resumes::handle_list_resumes),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get_resume).delete(resumes::handle_delete_resume),
        )
        .route(
            "/api/v1/resumes/:id/reparse",
            post(resumes::handle_reparse_resume),
        )
        // Analyses
        .route(
            "/api/v1/analyses",
            post(analysis::handle_create_analysis).get(analysis::handle_list_analyses),
        )
        .route(
            "/api/v1/analyses/:id",
            get(analysis::handle_get_analysis).delete(analysis::handle_delete_analysis),
        )
        // Catalog
        .route("/api/v1/roles", get(catalog::handle_list_roles))
        .route("/api/v1/roles/:id", get(catalog::handle_get_role))
        .route("/api/v1/courses", get(catalog::handle_list_courses))
        .route("/api/v1/courses/:id", get(catalog::handle_get_course))
        // Dashboard
        .route(
            "/api/v1/dashboard/stats",
            get(dashboard::handle_dashboard_stats),
        )
        .route(
            "/api/v1/dashboard/skill-gap",
            get(dashboard::handle_skill_gap),
        )
        // Chat
        .route("/api/v1/chat", post(chat::handle_chat))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use aws_sdk_s3::config::{BehaviorVersion, Region};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::dashboard::cache::memory::MemoryStatsCache;
    use crate::llm_client::LlmClient;
    use crate::resumes::parser_client::ParserClient;

    /// State whose collaborators are never reached by the requests below:
    /// the pool connects lazily and the HTTP clients point nowhere.
    fn test_state() -> AppState {
        let config = Config {
            database_url: "postgres://localhost/skillgap_test".to_string(),
            redis_url: "redis://127.0.0.1/".to_string(),
            s3_bucket: "resumes-test".to_string(),
            s3_endpoint: "http://127.0.0.1:9000".to_string(),
            aws_access_key_id: "test".to_string(),
            aws_secret_access_key: "test".to_string(),
            anthropic_api_key: "test".to_string(),
            parser_service_url: "http://127.0.0.1:9".to_string(),
            parser_timeout_secs: 1,
            stats_stale_after_secs: 3600,
            port: 0,
            rust_log: "debug".to_string(),
        };

        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .build();

        AppState {
            db: PgPoolOptions::new()
                .connect_lazy(&config.database_url)
                .unwrap(),
            s3: aws_sdk_s3::Client::from_conf(s3_config),
            llm: LlmClient::new(config.anthropic_api_key.clone()).unwrap(),
            parser: ParserClient::new(config.parser_service_url.clone(), 1).unwrap(),
            stats_cache: Arc::new(MemoryStatsCache::default()),
            config,
        }
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let response = build_router(test_state())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "skillgap-api");
    }

    #[tokio::test]
    async fn test_chat_rejects_blank_message() {
        let request = Request::post("/api/v1/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"message": "   "}"#))
            .unwrap();

        let response = build_router(test_state()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_invalid_course_difficulty_rejected() {
        let response = build_router(test_state())
            .oneshot(
                Request::get("/api/v1/courses?difficulty=expert")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("beginner, intermediate, advanced"));
    }

    #[tokio::test]
    async fn test_malformed_id_is_client_error() {
        let response = build_router(test_state())
            .oneshot(
                Request::get("/api/v1/roles/not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = build_router(test_state())
            .oneshot(Request::get("/api/v1/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
