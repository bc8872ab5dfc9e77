//! Client for the LlamaParse document parsing service.
//!
//! Flow: upload the file, poll the job until it settles, fetch the result in
//! the configured format (`markdown` or `text`).

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Deserialize;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::config::LlamaParseConfig;
use crate::document::{DocumentParser, ParseError, ParsedDocument};

#[derive(Debug, Deserialize)]
struct JobStatus {
    id: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct JobResult {
    markdown: Option<String>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

pub struct LlamaParseClient {
    client: Client,
    config: LlamaParseConfig,
}

impl LlamaParseClient {
    pub fn new(config: LlamaParseConfig, timeout: Duration) -> Result<Self, ParseError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            config,
        })
    }

    async fn upload(&self, path: &Path) -> Result<String, ParseError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("resume.pdf")
            .to_string();
        debug!("Uploading {} bytes to LlamaParse", bytes.len());

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/pdf")?;
        let form = Form::new()
            .part("file", part)
            .text("language", self.config.language.clone());

        let response = self
            .client
            .post(format!("{}/api/parsing/upload", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await?;

        let job: JobStatus = ensure_success(response).await?.json().await?;
        info!("LlamaParse job {} created", job.id);
        Ok(job.id)
    }

    async fn wait_for_job(&self, job_id: &str) -> Result<(), ParseError> {
        let started = Instant::now();
        loop {
            let response = self
                .client
                .get(format!("{}/api/parsing/job/{job_id}", self.config.base_url))
                .bearer_auth(&self.config.api_key)
                .send()
                .await?;
            let job: JobStatus = ensure_success(response).await?.json().await?;

            // Anything other than PENDING is final (ERROR, CANCELLED, PARTIAL_SUCCESS, ...).
            match job.status.as_str() {
                "SUCCESS" => return Ok(()),
                "PENDING" => debug!("LlamaParse job {job_id} is PENDING"),
                _ => {
                    return Err(ParseError::JobFailed {
                        job_id: job_id.to_string(),
                        status: job.status,
                    })
                }
            }

            if started.elapsed() + self.config.poll_interval > self.config.max_wait {
                return Err(ParseError::Timeout {
                    job_id: job_id.to_string(),
                    max_wait: self.config.max_wait,
                });
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    async fn fetch_result(&self, job_id: &str) -> Result<String, ParseError> {
        let result_type = &self.config.result_type;
        let response = self
            .client
            .get(format!(
                "{}/api/parsing/job/{job_id}/result/{result_type}",
                self.config.base_url
            ))
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;
        let result: JobResult = ensure_success(response).await?.json().await?;

        let text = match result_type.as_str() {
            "text" => result.text,
            _ => result.markdown,
        };
        text.ok_or_else(|| ParseError::MissingResult {
            job_id: job_id.to_string(),
            result_type: result_type.clone(),
        })
    }
}

#[async_trait]
impl DocumentParser for LlamaParseClient {
    fn name(&self) -> &'static str {
        "llama_parse"
    }

    async fn parse(&self, path: &Path) -> Result<Vec<ParsedDocument>, ParseError> {
        let job_id = self.upload(path).await?;
        self.wait_for_job(&job_id).await?;
        let text = self.fetch_result(&job_id).await?;
        Ok(vec![ParsedDocument { text }])
    }
}

/// Turns a non-2xx response into `ParseError::Api`, preferring the `detail` field.
async fn ensure_success(response: Response) -> Result<Response, ParseError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(s),
        }) => s,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) => body,
    };
    Err(ParseError::Api {
        status: status.as_u16(),
        message,
    })
}
