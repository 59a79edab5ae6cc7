use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::dashboard::cache::StatsCache;
use crate::llm_client::LlmClient;
use crate::resumes::parser_client::ParserClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Resume blobs.
    pub s3: S3Client,
    pub llm: LlmClient,
    pub parser: ParserClient,
    /// Per-user dashboard snapshots. Default: Redis.
    pub stats_cache: Arc<dyn StatsCache>,
    pub config: Config,
}
