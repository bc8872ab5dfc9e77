//! Job Posting Fetcher: one GET per URL, markup stripped, whitespace collapsed.
//!
//! No JavaScript rendering, no site-specific extraction, no retries.

use std::time::Duration;

use reqwest::{Client, Url};
use tracing::{debug, info, warn};

use crate::errors::AppError;

pub mod handlers;
pub mod html;

const SERVICE: &str = "Job posting";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

#[derive(Clone)]
pub struct JobPostingFetcher {
    client: Client,
}

impl JobPostingFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .timeout(timeout)
                .build()?,
        })
    }

    /// Fetches `job_url` and returns its visible text.
    pub async fn fetch(&self, job_url: &str) -> Result<String, AppError> {
        let url = parse_job_url(job_url)?;
        debug!("Fetching job posting {url}");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::upstream(SERVICE, e.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| AppError::upstream(SERVICE, e.to_string()))?;
        debug!("Job posting body: {} bytes", body.len());

        let text = html::visible_text(&body);
        if text.is_empty() {
            warn!("No readable text at {url}");
            return Err(AppError::Validation(
                "The job posting page has no readable text".to_string(),
            ));
        }

        info!("Fetched job posting: {} chars", text.len());
        Ok(text)
    }
}

fn parse_job_url(raw: &str) -> Result<Url, AppError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| AppError::Validation(format!("Invalid job URL '{raw}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::Validation(format!(
            "Job URL must use http or https, got '{other}'"
        ))),
    }
}
