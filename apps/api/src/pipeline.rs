//! Server-side run of the full evaluation: parse resume, fetch job, evaluate.
//!
//! Steps run strictly in order. A failure at step N returns that step's
//! error and the later steps never run. Form inputs are checked in step
//! order too, before any outside call.

use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use crate::document::extractor::check_upload;
use crate::document::handlers::UploadForm;
use crate::errors::AppError;
use crate::models::evaluation::EvaluationResult;
use crate::models::resume::ResumeData;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStep {
    ParseResume,
    FetchJob,
    Evaluate,
}

impl PipelineStep {
    /// 1-based position in the run.
    pub fn number(self) -> u8 {
        match self {
            PipelineStep::ParseResume => 1,
            PipelineStep::FetchJob => 2,
            PipelineStep::Evaluate => 3,
        }
    }
}

#[derive(Debug)]
pub struct PipelineError {
    pub step: PipelineStep,
    pub source: AppError,
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        let mut error = self.source.error_body();
        error["step"] = json!(self.step.number());
        error["step_name"] = json!(self.step);
        (self.source.status(), Json(json!({ "error": error }))).into_response()
    }
}

fn at(step: PipelineStep) -> impl FnOnce(AppError) -> PipelineError {
    move |source| PipelineError { step, source }
}

#[derive(Debug, Serialize)]
pub struct PipelineResponse {
    pub resume_data: ResumeData,
    pub job_description: String,
    pub analysis: EvaluationResult,
}

/// Runs the three steps against `state`'s components.
pub async fn run_pipeline(
    state: &AppState,
    file_name: &str,
    pdf: &[u8],
    job_url: &str,
) -> Result<PipelineResponse, PipelineError> {
    let resume_data = state
        .extractor
        .extract(file_name, pdf)
        .await
        .map_err(at(PipelineStep::ParseResume))?;
    info!("Pipeline step 1/3 done: resume parsed");

    let job_description = state
        .fetcher
        .fetch(job_url)
        .await
        .map_err(at(PipelineStep::FetchJob))?;
    info!("Pipeline step 2/3 done: job posting fetched");

    let analysis = state
        .evaluator
        .evaluate(&resume_data.text, &job_description)
        .await
        .map_err(at(PipelineStep::Evaluate))?;
    info!("Pipeline step 3/3 done: evaluation complete");

    Ok(PipelineResponse {
        resume_data,
        job_description,
        analysis,
    })
}

/// POST /api/v1/run
///
/// Multipart form with `file` (PDF) and `job_url`.
pub async fn handle_run(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<PipelineResponse>, PipelineError> {
    let mut form = UploadForm::read(multipart)
        .await
        .map_err(at(PipelineStep::ParseResume))?;
    let (file_name, data) = form
        .require_file()
        .map_err(at(PipelineStep::ParseResume))?;
    // Step 1 input checks run before the job_url check.
    check_upload(&file_name, &data).map_err(at(PipelineStep::ParseResume))?;
    let job_url = form.fields.remove("job_url").unwrap_or_default();
    if job_url.trim().is_empty() {
        warn!("Pipeline run without job_url");
        return Err(PipelineError {
            step: PipelineStep::FetchJob,
            source: AppError::Validation("Missing 'job_url' form field".to_string()),
        });
    }

    let response = run_pipeline(&state, &file_name, &data, &job_url).await?;
    Ok(Json(response))
}
