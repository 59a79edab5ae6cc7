//! Storage for per-user dashboard snapshots.
//!
//! The snapshot is an explicit cache entry owned by this trait; deciding
//! whether it is still usable is `stats::is_fresh`, not the store's job.

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::warn;
use uuid::Uuid;

use crate::dashboard::stats::Stats;
use crate::errors::AppError;

/// Carried in `AppState` as `Arc<dyn StatsCache>`.
#[async_trait]
pub trait StatsCache: Send + Sync {
    async fn load(&self, user_id: Uuid) -> Result<Option<Stats>, AppError>;
    async fn store(&self, user_id: Uuid, stats: &Stats) -> Result<(), AppError>;
}

/// Redis-backed snapshot store: one JSON value per user under `stats:{user_id}`.
pub struct RedisStatsCache {
    client: redis::Client,
}

impl RedisStatsCache {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }
}

fn cache_key(user_id: Uuid) -> String {
    format!("stats:{user_id}")
}

#[async_trait]
impl StatsCache for RedisStatsCache {
    async fn load(&self, user_id: Uuid) -> Result<Option<Stats>, AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = conn.get(cache_key(user_id)).await?;

        Ok(raw.and_then(|raw| match serde_json::from_str::<Stats>(&raw) {
            Ok(stats) => Some(stats),
            Err(e) => {
                // unreadable entries are treated as a miss and overwritten
                warn!("Discarding unreadable stats entry for user {user_id}: {e}");
                None
            }
        }))
    }

    async fn store(&self, user_id: Uuid, stats: &Stats) -> Result<(), AppError> {
        let payload = serde_json::to_string(stats).map_err(anyhow::Error::from)?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set::<_, _, ()>(cache_key(user_id), payload).await?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_is_namespaced_per_user() {
        let user_id = Uuid::parse_str("6f1c1f59-3a0e-4d4b-9a51-0c1c8c9d2f10").unwrap();
        assert_eq!(
            cache_key(user_id),
            "stats:6f1c1f59-3a0e-4d4b-9a51-0c1c8c9d2f10"
        );
    }
}
