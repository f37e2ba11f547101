//! Axum route handlers for the Evaluation API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::evaluation::models::{EvaluationListing, EvaluationResult};
use crate::evaluation::orchestrator::run_evaluation;
use crate::evaluation::store::RECENT_RESULTS_LIMIT;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub candidate_id: String,
}

/// POST /api/v1/evaluations
///
/// Runs every registered criterion for the candidate and returns the stored result.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvaluationResult>, AppError> {
    let candidate_id = request.candidate_id.trim();
    if candidate_id.is_empty() {
        return Err(AppError::Validation(
            "candidate_id cannot be empty".to_string(),
        ));
    }

    let result = run_evaluation(
        candidate_id,
        &state.registry,
        state.retriever.as_ref(),
        state.llm.as_ref(),
        state.store.as_ref(),
    )
    .await?;

    Ok(Json(result))
}

/// GET /api/v1/evaluations
pub async fn handle_list_evaluations(
    State(state): State<AppState>,
) -> Result<Json<Vec<EvaluationListing>>, AppError> {
    let listings = state.store.list_recent(RECENT_RESULTS_LIMIT).await?;
    Ok(Json(listings))
}

/// GET /api/v1/evaluations/:id
pub async fn handle_get_evaluation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<EvaluationResult>, AppError> {
    let result = state
        .store
        .load(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Result {id} not found")))?;
    Ok(Json(result))
}
