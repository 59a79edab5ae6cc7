use sqlx::PgPool;
use uuid::Uuid;

use crate::models::analysis::AnalysisRow;

pub async fn insert_analysis(pool: &PgPool, row: &AnalysisRow) -> Result<AnalysisRow, sqlx::Error> {
    sqlx::query_as::<_, AnalysisRow>(
        r#"
        INSERT INTO analyses
            (id, user_id, resume_id, role_id, role_title, match_percentage,
             matching_skills, missing_skills, feedback, recommended_courses, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(row.id)
    .bind(row.user_id)
    .bind(row.resume_id)
    .bind(row.role_id)
    .bind(&row.role_title)
    .bind(row.match_percentage)
    .bind(&row.matching_skills)
    .bind(&row.missing_skills)
    .bind(&row.feedback)
    .bind(&row.recommended_courses)
    .bind(row.created_at)
    .fetch_one(pool)
    .await
}

pub async fn fetch_analysis(pool: &PgPool, id: Uuid) -> Result<Option<AnalysisRow>, sqlx::Error> {
    sqlx::query_as::<_, AnalysisRow>("SELECT * FROM analyses WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// All analyses of a user, newest first.
pub async fn list_analyses(pool: &PgPool, user_id: Uuid) -> Result<Vec<AnalysisRow>, sqlx::Error> {
    sqlx::query_as::<_, AnalysisRow>(
        "SELECT * FROM analyses WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn delete_analysis(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM analyses WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
