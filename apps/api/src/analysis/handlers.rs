//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::analysis::queries;
use crate::analysis::service::{create_analysis, CreateAnalysisRequest};
use crate::errors::AppError;
use crate::models::analysis::AnalysisRow;
use crate::routes::UserIdQuery;
use crate::state::AppState;

/// POST /api/v1/analyses
///
/// Matches a parsed resume against a role and stores the result.
pub async fn handle_create_analysis(
    State(state): State<AppState>,
    Json(request): Json<CreateAnalysisRequest>,
) -> Result<(StatusCode, Json<AnalysisRow>), AppError> {
    let analysis = create_analysis(&state.db, &request).await?;
    Ok((StatusCode::CREATED, Json(analysis)))
}

/// GET /api/v1/analyses?user_id=
pub async fn handle_list_analyses(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<AnalysisRow>>, AppError> {
    Ok(Json(queries::list_analyses(&state.db, params.user_id).await?))
}

/// GET /api/v1/analyses/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(analysis_id): Path<Uuid>,
) -> Result<Json<AnalysisRow>, AppError> {
    let analysis = queries::fetch_analysis(&state.db, analysis_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Analysis {analysis_id} not found")))?;
    Ok(Json(analysis))
}

/// DELETE /api/v1/analyses/:id
pub async fn handle_delete_analysis(
    State(state): State<AppState>,
    Path(analysis_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !queries::delete_analysis(&state.db, analysis_id).await? {
        return Err(AppError::NotFound(format!("Analysis {analysis_id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}
