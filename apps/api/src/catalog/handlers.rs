use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::catalog::queries;
use crate::errors::AppError;
use crate::models::course::{CourseRecord, DIFFICULTY_TIERS};
use crate::models::role::RoleRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RoleSearch {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CourseSearch {
    pub skill: Option<String>,
    pub difficulty: Option<String>,
}

/// Blank query parameters count as absent.
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// GET /api/v1/roles
pub async fn handle_list_roles(
    State(state): State<AppState>,
    Query(search): Query<RoleSearch>,
) -> Result<Json<Vec<RoleRow>>, AppError> {
    Ok(Json(queries::list_roles(&state.db, non_blank(&search.q)).await?))
}

/// GET /api/v1/roles/:id
pub async fn handle_get_role(
    State(state): State<AppState>,
    Path(role_id): Path<Uuid>,
) -> Result<Json<RoleRow>, AppError> {
    let role = queries::fetch_role(&state.db, role_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Role {role_id} not found")))?;
    Ok(Json(role))
}

/// GET /api/v1/courses
pub async fn handle_list_courses(
    State(state): State<AppState>,
    Query(search): Query<CourseSearch>,
) -> Result<Json<Vec<CourseRecord>>, AppError> {
    let difficulty = non_blank(&search.difficulty)
        .map(|d| {
            let d = d.to_ascii_lowercase();
            if DIFFICULTY_TIERS.contains(&d.as_str()) {
                Ok(d)
            } else {
                Err(AppError::Validation(format!(
                    "difficulty must be one of: {}",
                    DIFFICULTY_TIERS.join(", ")
                )))
            }
        })
        .transpose()?;

    let courses =
        queries::list_courses(&state.db, non_blank(&search.skill), difficulty.as_deref()).await?;
    Ok(Json(courses))
}

/// GET /api/v1/courses/:id
pub async fn handle_get_course(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<Json<CourseRecord>, AppError> {
    let course = queries::fetch_course(&state.db, course_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Course {course_id} not found")))?;
    Ok(Json(course))
}
