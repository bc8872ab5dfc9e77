use tracing::info;

use crate::errors::AppError;
use crate::evaluation::prompts::{evaluation_system, render_evaluation_prompt};
use crate::llm_client::{LlmClient, LlmError};
use crate::models::evaluation::EvaluationResult;

const SERVICE: &str = "Completion API";

/// Scores a resume against a job description through the completion API.
#[derive(Clone)]
pub struct MatchEvaluator {
    llm: LlmClient,
}

impl MatchEvaluator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }

    pub async fn evaluate(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<EvaluationResult, AppError> {
        if resume_text.trim().is_empty() {
            return Err(AppError::Validation(
                "resume_text cannot be empty".to_string(),
            ));
        }
        if job_description.trim().is_empty() {
            return Err(AppError::Validation(
                "job_description cannot be empty".to_string(),
            ));
        }

        let prompt = render_evaluation_prompt(resume_text, job_description);
        let result: EvaluationResult = self
            .llm
            .call_json(&prompt, &evaluation_system())
            .await
            .map_err(|e| match e {
                LlmError::Parse(e) => AppError::upstream(
                    SERVICE,
                    format!("model output did not match the evaluation schema: {e}"),
                ),
                other => AppError::upstream(SERVICE, other.to_string()),
            })?;

        result.validate().map_err(|reason| {
            AppError::upstream(
                SERVICE,
                format!("model output did not match the evaluation schema: {reason}"),
            )
        })?;

        info!("Evaluation complete: match_score={}", result.match_score);
        Ok(result)
    }
}
