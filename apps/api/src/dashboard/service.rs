use std::future::Future;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::dashboard::cache::StatsCache;
use crate::dashboard::stats::{compute_stats, is_fresh, Stats, StatsOutcome};
use crate::errors::AppError;
use crate::models::resume::ResumeRow;

/// Returns the user's dashboard stats, serving the stored snapshot while it is
/// fresh and otherwise recomputing from `fetch_resumes` and storing the result.
///
/// Cache read and write failures are logged and do not fail the request.
/// Concurrent refreshes for one user may overwrite each other; either result
/// is a valid snapshot.
pub async fn load_stats<F, Fut>(
    cache: &dyn StatsCache,
    user_id: Uuid,
    stale_after: Duration,
    now: DateTime<Utc>,
    fetch_resumes: F,
) -> Result<Stats, AppError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<ResumeRow>, AppError>>,
{
    let prior = match cache.load(user_id).await {
        Ok(prior) => prior,
        Err(e) => {
            warn!("Stats cache read failed for user {user_id}: {e}");
            None
        }
    };

    if let Some(prior) = prior.as_ref().filter(|p| is_fresh(p, stale_after, now)) {
        debug!("Serving cached stats for user {user_id}");
        return Ok(prior.clone());
    }

    let resumes = fetch_resumes().await?;

    let outcome = compute_stats(&resumes, prior.as_ref(), stale_after, now);
    if let StatsOutcome::Recomputed(stats) = &outcome {
        info!(
            "Recomputed stats for user {user_id}: {} resumes, {} distinct skills",
            stats.total_resumes, stats.distinct_skills
        );
        if let Err(e) = cache.store(user_id, stats).await {
            warn!("Stats cache write failed for user {user_id}: {e}");
        }
    }

    Ok(outcome.into_stats())
}
