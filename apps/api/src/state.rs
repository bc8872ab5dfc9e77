use anyhow::{Context, Result};

use crate::config::Config;
use crate::document::build_parser;
use crate::document::extractor::DocumentExtractor;
use crate::evaluation::evaluator::MatchEvaluator;
use crate::job_posting::JobPostingFetcher;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub extractor: DocumentExtractor,
    pub fetcher: JobPostingFetcher,
    pub evaluator: MatchEvaluator,
}

impl AppState {
    /// Builds every component from the validated config.
    pub fn from_config(config: Config) -> Result<Self> {
        let parser = build_parser(&config).context("building document parser")?;
        let fetcher =
            JobPostingFetcher::new(config.http_timeout).context("building job posting client")?;
        let llm = LlmClient::new(
            config.openai_api_key.clone(),
            &config.openai_base_url,
            config.http_timeout,
        )
        .context("building LLM client")?;

        Ok(AppState {
            extractor: DocumentExtractor::new(parser),
            fetcher,
            evaluator: MatchEvaluator::new(llm),
            config,
        })
    }
}
