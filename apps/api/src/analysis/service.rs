use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::analysis::queries;
use crate::catalog::queries::{fetch_courses_for_skills, fetch_role};
use crate::errors::AppError;
use crate::matching::courses::{recommend_courses, DEFAULT_COURSE_LIMIT};
use crate::matching::feedback::{generate_feedback, Feedback};
use crate::matching::matcher::{compute_match, MatchResult};
use crate::matching::skill::Skill;
use crate::models::analysis::AnalysisRow;
use crate::models::course::CourseRecord;
use crate::models::resume::ResumeRow;
use crate::models::role::RoleRow;
use crate::resumes::queries::fetch_resume;

#[derive(Debug, Deserialize)]
pub struct CreateAnalysisRequest {
    pub user_id: Uuid,
    pub resume_id: Uuid,
    pub role_id: Uuid,
}

/// Everything derived from one resume × role comparison.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub match_result: MatchResult,
    pub feedback: Feedback,
    pub recommended_courses: Vec<CourseRecord>,
}

/// Runs matcher → feedback → course recommender. Pure; `catalog` is whatever
/// candidate courses the caller loaded, in catalog order.
pub fn evaluate(resume: &ResumeRow, role: &RoleRow, catalog: &[CourseRecord]) -> AnalysisReport {
    let candidate = resume.skills();
    let match_result = compute_match(&candidate, &role.required(), &role.preferred());
    let feedback = generate_feedback(&match_result, candidate.len());
    let recommended_courses =
        recommend_courses(catalog, &match_result.missing_skills, DEFAULT_COURSE_LIMIT);

    AnalysisReport {
        match_result,
        feedback,
        recommended_courses,
    }
}

fn to_row(
    resume: &ResumeRow,
    role: &RoleRow,
    report: AnalysisReport,
    created_at: DateTime<Utc>,
) -> Result<AnalysisRow, AppError> {
    let feedback = serde_json::to_value(&report.feedback).map_err(anyhow::Error::from)?;
    let recommended_courses =
        serde_json::to_value(&report.recommended_courses).map_err(anyhow::Error::from)?;

    Ok(AnalysisRow {
        id: Uuid::new_v4(),
        user_id: resume.user_id,
        resume_id: resume.id,
        role_id: role.id,
        role_title: role.title.clone(),
        match_percentage: i16::from(report.match_result.match_percentage),
        matching_skills: Skill::into_strings(report.match_result.matching_skills),
        missing_skills: Skill::into_strings(report.match_result.missing_skills),
        feedback,
        recommended_courses,
        created_at,
    })
}

/// Loads a resume the user owns, rejecting resumes without extracted skills.
pub async fn load_parsed_resume(
    pool: &PgPool,
    user_id: Uuid,
    resume_id: Uuid,
) -> Result<ResumeRow, AppError> {
    let resume = fetch_resume(pool, resume_id)
        .await?
        .filter(|r| r.user_id == user_id)
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

    if !resume.is_parsed() {
        return Err(AppError::UnprocessableEntity(format!(
            "Resume {resume_id} has no extracted skills (status: {})",
            resume.status
        )));
    }
    Ok(resume)
}

pub async fn load_role(pool: &PgPool, role_id: Uuid) -> Result<RoleRow, AppError> {
    fetch_role(pool, role_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Role {role_id} not found")))
}

/// Computes a fresh analysis for the request and stores it.
pub async fn create_analysis(
    pool: &PgPool,
    request: &CreateAnalysisRequest,
) -> Result<AnalysisRow, AppError> {
    let resume = load_parsed_resume(pool, request.user_id, request.resume_id).await?;
    let role = load_role(pool, request.role_id).await?;

    let role_skills: Vec<Skill> = role.required().into_iter().chain(role.preferred()).collect();
    let catalog = fetch_courses_for_skills(pool, &role_skills).await?;

    let report = evaluate(&resume, &role, &catalog);
    info!(
        "Analysis of resume {} against role '{}': {}% ({} missing)",
        resume.id,
        role.title,
        report.match_result.match_percentage,
        report.match_result.missing_skills.len()
    );

    let row = to_row(&resume, &role, report, Utc::now())?;
    Ok(queries::insert_analysis(pool, &row).await?)
}
