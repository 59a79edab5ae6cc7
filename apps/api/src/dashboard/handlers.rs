//! Axum route handlers for the Dashboard API.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::service::load_role;
use crate::catalog::queries::fetch_courses_for_skills;
use crate::dashboard::service::load_stats;
use crate::dashboard::stats::Stats;
use crate::errors::AppError;
use crate::matching::courses::{recommendations_by_skill, SkillCourses, COURSES_PER_SKILL};
use crate::matching::feedback::{generate_feedback, Feedback};
use crate::matching::matcher::{compute_match, MatchResult};
use crate::resumes::queries::{latest_parsed_resume, list_resumes};
use crate::routes::UserIdQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SkillGapQuery {
    pub user_id: Uuid,
    pub role_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct SkillGapResponse {
    pub resume_id: Uuid,
    pub role_id: Uuid,
    pub role_title: String,
    pub match_result: MatchResult,
    pub feedback: Feedback,
    pub courses_by_skill: Vec<SkillCourses>,
}

/// GET /api/v1/dashboard/stats?user_id=
///
/// Served from the stats cache while fresh; recomputed and written back otherwise.
pub async fn handle_dashboard_stats(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Stats>, AppError> {
    let user_id = params.user_id;
    let stale_after = Duration::seconds(state.config.stats_stale_after_secs);
    let db = state.db.clone();

    let stats = load_stats(
        state.stats_cache.as_ref(),
        user_id,
        stale_after,
        Utc::now(),
        || async move { list_resumes(&db, user_id).await.map_err(AppError::from) },
    )
    .await?;

    Ok(Json(stats))
}

/// GET /api/v1/dashboard/skill-gap?user_id=&role_id=
///
/// Compares the user's latest parsed resume with a role without storing anything.
pub async fn handle_skill_gap(
    State(state): State<AppState>,
    Query(params): Query<SkillGapQuery>,
) -> Result<Json<SkillGapResponse>, AppError> {
    let resume = latest_parsed_resume(&state.db, params.user_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "No parsed resume found for user {}",
                params.user_id
            ))
        })?;
    let role = load_role(&state.db, params.role_id).await?;

    let candidate = resume.skills();
    let match_result = compute_match(&candidate, &role.required(), &role.preferred());
    let feedback = generate_feedback(&match_result, candidate.len());

    let catalog = fetch_courses_for_skills(&state.db, &match_result.missing_skills).await?;
    let courses_by_skill =
        recommendations_by_skill(&catalog, &match_result.missing_skills, COURSES_PER_SKILL);

    Ok(Json(SkillGapResponse {
        resume_id: resume.id,
        role_id: role.id,
        role_title: role.title,
        match_result,
        feedback,
        courses_by_skill,
    }))
}
