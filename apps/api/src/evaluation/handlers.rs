//! Axum route handlers for the Evaluation API.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::models::evaluation::{EvaluateRequest, EvaluateResponse};
use crate::state::AppState;

/// POST /api/v1/evaluate
///
/// Scores `resume_text` against `job_description`.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, AppError> {
    let analysis = state
        .evaluator
        .evaluate(&request.resume_text, &request.job_description)
        .await?;
    Ok(Json(EvaluateResponse { analysis }))
}
