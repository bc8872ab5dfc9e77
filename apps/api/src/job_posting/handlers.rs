//! Axum route handlers for the job posting fetcher.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::models::job::{AnalyzeJobRequest, AnalyzeJobResponse};
use crate::state::AppState;

/// POST /api/v1/analyze-job
///
/// Fetches the posting at `job_url` and returns its text.
pub async fn handle_analyze_job(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeJobRequest>,
) -> Result<Json<AnalyzeJobResponse>, AppError> {
    let job_description = state.fetcher.fetch(&request.job_url).await?;
    Ok(Json(AnalyzeJobResponse { job_description }))
}
