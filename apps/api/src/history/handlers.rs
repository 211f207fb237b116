use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::analysis::handlers::AnalysisDetailResponse;
use crate::analysis::scoring::Confidence;
use crate::errors::AppError;
use crate::models::analysis::AnalysisRecord;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SkillConfidenceUpdate {
    pub skill: String,
    pub confidence: Confidence,
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Analysis {id} not found"))
}

/// GET /api/v1/analyses
pub async fn handle_list_analyses(
    State(state): State<AppState>,
) -> Result<Json<Vec<AnalysisRecord>>, AppError> {
    Ok(Json(state.store.list().await?))
}

/// GET /api/v1/analyses/latest
pub async fn handle_latest_analysis(
    State(state): State<AppState>,
) -> Result<Json<AnalysisDetailResponse>, AppError> {
    let record = state
        .store
        .latest()
        .await?
        .ok_or_else(|| AppError::NotFound("No analyses yet".to_string()))?;
    Ok(Json(record.into()))
}

/// GET /api/v1/analyses/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AnalysisDetailResponse>, AppError> {
    let record = state
        .store
        .find_by_id(&id)
        .await?
        .ok_or_else(|| not_found(&id))?;
    Ok(Json(record.into()))
}

/// DELETE /api/v1/analyses/:id
pub async fn handle_delete_analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.store.delete_by_id(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(&id))
    }
}

/// DELETE /api/v1/analyses
pub async fn handle_clear_history(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.store.clear().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/analyses/:id/skills
///
/// Records "know"/"practice" for one of the analysis's detected skills; the
/// response carries the recomputed score.
pub async fn handle_update_skill_confidence(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SkillConfidenceUpdate>,
) -> Result<Json<AnalysisDetailResponse>, AppError> {
    if req.skill.trim().is_empty() {
        return Err(AppError::Validation("skill cannot be empty".to_string()));
    }

    let record = state
        .store
        .update_skill_confidence(&id, &req.skill, req.confidence)
        .await?;
    Ok(Json(record.into()))
}
