use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AnalyzeJobRequest {
    pub job_url: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeJobResponse {
    pub job_description: String,
}
