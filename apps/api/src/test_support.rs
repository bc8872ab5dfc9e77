//! In-process stand-ins for the remote services, for tests only.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::config::Config;
use crate::state::AppState;

pub const MULTIPART_BOUNDARY: &str = "----evaluator-test-boundary";

/// Serves `app` on an ephemeral localhost port and returns its base URL.
pub async fn spawn_upstream(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("upstream server");
    });
    format!("http://{addr}")
}

#[derive(Default)]
struct Counters {
    parser_uploads: AtomicUsize,
    job_fetches: AtomicUsize,
    completions: AtomicUsize,
}

/// One fake server playing LlamaParse, the completion API and a job site.
///
/// - LlamaParse returns `Experience\n\nBuilt X.\n\nEducation\n\nBS CS.`
/// - `/job` returns `<html><body>  Hello   World </body></html>`
/// - `/missing` returns 404
/// - the completion API returns a valid evaluation with `match_score` 78
pub struct FakeServices {
    base_url: String,
    counters: Arc<Counters>,
}

impl FakeServices {
    pub async fn start() -> Self {
        let counters = Arc::new(Counters::default());
        let app = Router::new()
            .route(
                "/api/parsing/upload",
                post(|State(c): State<Arc<Counters>>| async move {
                    c.parser_uploads.fetch_add(1, Ordering::SeqCst);
                    Json(json!({"id": "job-1", "status": "PENDING"}))
                }),
            )
            .route(
                "/api/parsing/job/:id",
                get(|| async { Json(json!({"id": "job-1", "status": "SUCCESS"})) }),
            )
            .route(
                "/api/parsing/job/:id/result/markdown",
                get(|| async {
                    Json(json!({"markdown": "Experience\n\nBuilt X.\n\nEducation\n\nBS CS."}))
                }),
            )
            .route(
                "/job",
                get(|State(c): State<Arc<Counters>>| async move {
                    c.job_fetches.fetch_add(1, Ordering::SeqCst);
                    Html("<html><body>  Hello   World </body></html>")
                }),
            )
            .route(
                "/missing",
                get(|State(c): State<Arc<Counters>>| async move {
                    c.job_fetches.fetch_add(1, Ordering::SeqCst);
                    (StatusCode::NOT_FOUND, "no such job")
                }),
            )
            .route(
                "/v1/chat/completions",
                post(|State(c): State<Arc<Counters>>| async move {
                    c.completions.fetch_add(1, Ordering::SeqCst);
                    let analysis = json!({
                        "match_score": 78,
                        "summary": "Good overlap.",
                        "qualifications_match": ["Built X"],
                        "gaps": ["No Kubernetes"],
                        "recommendations": ["Add metrics"],
                        "email_draft": "Hi, I am applying for the role."
                    });
                    Json(json!({
                        "choices": [{"message": {"content": analysis.to_string()}}],
                        "usage": {"prompt_tokens": 100, "completion_tokens": 50}
                    }))
                }),
            )
            .with_state(counters.clone());

        let base_url = spawn_upstream(app).await;
        Self { base_url, counters }
    }

    pub fn config(&self) -> Config {
        let vars: HashMap<&str, String> = HashMap::from([
            ("OPENAI_API_KEY", "sk-test".to_string()),
            ("OPENAI_BASE_URL", self.base_url.clone()),
            ("LLAMA_PARSE_API_KEY", "llx-test".to_string()),
            ("LLAMA_PARSE_BASE_URL", self.base_url.clone()),
            ("LLAMA_PARSE_POLL_INTERVAL_MS", "10".to_string()),
            ("LLAMA_PARSE_MAX_WAIT_SECS", "5".to_string()),
            ("HTTP_TIMEOUT_SECS", "5".to_string()),
        ]);
        Config::from_lookup(|key| vars.get(key).cloned()).expect("test config")
    }

    pub fn state(&self) -> AppState {
        AppState::from_config(self.config()).expect("test state")
    }

    pub fn job_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn parser_calls(&self) -> usize {
        self.counters.parser_uploads.load(Ordering::SeqCst)
    }

    pub fn job_fetches(&self) -> usize {
        self.counters.job_fetches.load(Ordering::SeqCst)
    }

    pub fn completion_calls(&self) -> usize {
        self.counters.completions.load(Ordering::SeqCst)
    }
}

/// Encodes a `multipart/form-data` body using `MULTIPART_BOUNDARY`.
pub fn multipart_body(file: Option<(&str, &[u8])>, fields: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/pdf\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}
