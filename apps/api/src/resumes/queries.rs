use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::resume::{ResumeRow, ResumeStatus};

pub struct NewResume<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub s3_key: &'a str,
}

pub async fn insert_resume(pool: &PgPool, resume: NewResume<'_>) -> Result<ResumeRow, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes (id, user_id, file_name, content_type, s3_key, status)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(resume.id)
    .bind(resume.user_id)
    .bind(resume.file_name)
    .bind(resume.content_type)
    .bind(resume.s3_key)
    .bind(ResumeStatus::Processing.as_str())
    .fetch_one(pool)
    .await
}

pub async fn mark_parsed(
    pool: &PgPool,
    id: Uuid,
    skills: &[String],
    ats_score: f64,
    score_breakdown: &Value,
) -> Result<ResumeRow, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>(
        r#"
        UPDATE resumes
        SET status = $2, extracted_skills = $3, ats_score = $4, score_breakdown = $5,
            error_message = NULL, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(ResumeStatus::Parsed.as_str())
    .bind(skills)
    .bind(ats_score)
    .bind(score_breakdown)
    .fetch_one(pool)
    .await
}

/// Records a failed parse. Skills and score from an earlier successful parse,
/// if any, are left in place.
pub async fn mark_failed(pool: &PgPool, id: Uuid, error: &str) -> Result<ResumeRow, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>(
        r#"
        UPDATE resumes
        SET status = $2, error_message = $3, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(ResumeStatus::Failed.as_str())
    .bind(error)
    .fetch_one(pool)
    .await
}

pub async fn fetch_resume(pool: &PgPool, id: Uuid) -> Result<Option<ResumeRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// All resumes of a user, newest first.
pub async fn list_resumes(pool: &PgPool, user_id: Uuid) -> Result<Vec<ResumeRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>(
        "SELECT * FROM resumes WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn latest_parsed_resume(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<ResumeRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>(
        r#"
        SELECT * FROM resumes
        WHERE user_id = $1 AND status = $2
        ORDER BY created_at DESC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .bind(ResumeStatus::Parsed.as_str())
    .fetch_optional(pool)
    .await
}

/// Returns the deleted row, or `None` when nothing matched.
pub async fn delete_resume(pool: &PgPool, id: Uuid) -> Result<Option<ResumeRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>("DELETE FROM resumes WHERE id = $1 RETURNING *")
        .bind(id)
        .fetch_optional(pool)
        .await
}
