//! Axum route handlers for submitting job descriptions.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::analysis::pipeline::{analyze, AnalysisInput};
use crate::analysis::scoring::{readiness_tier, ReadinessTier};
use crate::analysis::skills::has_skills;
use crate::errors::AppError;
use crate::models::analysis::{AnalysisDraft, AnalysisRecord};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

/// A stored analysis plus the values the results view derives from it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDetailResponse {
    pub analysis: AnalysisRecord,
    pub readiness: ReadinessTier,
    /// False means the generic fresher plan was generated.
    pub has_skills: bool,
    pub total_skills: usize,
}

impl From<AnalysisRecord> for AnalysisDetailResponse {
    fn from(analysis: AnalysisRecord) -> Self {
        Self {
            readiness: readiness_tier(analysis.final_score),
            has_skills: has_skills(&analysis.extracted_skills),
            total_skills: analysis.extracted_skills.total_skill_count(),
            analysis,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPreviewResponse {
    pub analysis: AnalysisDraft,
    pub readiness: ReadinessTier,
    pub has_skills: bool,
    pub total_skills: usize,
}

fn validate_input(input: &AnalysisInput) -> Result<(), AppError> {
    if input.jd_text.trim().is_empty() {
        return Err(AppError::Validation(
            "jdText cannot be empty. Paste a job description to analyze.".to_string(),
        ));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyses
///
/// Runs the analysis pipeline and stores the result at the head of the history.
pub async fn handle_create_analysis(
    State(state): State<AppState>,
    Json(input): Json<AnalysisInput>,
) -> Result<(StatusCode, Json<AnalysisDetailResponse>), AppError> {
    validate_input(&input)?;

    let draft = analyze(&input);
    let record = state.store.append_new(draft).await?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

/// POST /api/v1/analyses/preview
///
/// Runs the pipeline without persisting anything.
pub async fn handle_preview_analysis(
    Json(input): Json<AnalysisInput>,
) -> Result<Json<AnalysisPreviewResponse>, AppError> {
    validate_input(&input)?;

    let draft = analyze(&input);
    Ok(Json(AnalysisPreviewResponse {
        readiness: readiness_tier(draft.base_score),
        has_skills: has_skills(&draft.extracted_skills),
        total_skills: draft.extracted_skills.total_skill_count(),
        analysis: draft,
    }))
}
