pub mod health;
pub mod ui;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::document::handlers::handle_parse_resume;
use crate::evaluation::handlers::handle_evaluate;
use crate::job_posting::handlers::handle_analyze_job;
use crate::pipeline::handle_run;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // UI
        .route("/", get(ui::serve_index))
        .route("/static/app.js", get(ui::serve_app_js))
        // Evaluation API
        .route("/api/v1/parse-resume", post(handle_parse_resume))
        .route("/api/v1/analyze-job", post(handle_analyze_job))
        .route("/api/v1/evaluate", post(handle_evaluate))
        .route("/api/v1/run", post(handle_run))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::util::ServiceExt; // for `oneshot`

    use crate::test_support::{multipart_body, FakeServices, MULTIPART_BOUNDARY};

    async fn extract_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Should read body");
        serde_json::from_slice(&bytes).expect("Should parse JSON")
    }

    fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let fakes = FakeServices::start().await;
        let response = build_router(fakes.state())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = extract_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "resume-evaluator");
    }

    #[tokio::test]
    async fn test_root_serves_ui() {
        let fakes = FakeServices::start().await;
        let app = build_router(fakes.state());

        let response = app
            .clone()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("Resume Evaluator"));

        let response = app
            .oneshot(Request::get("/static/app.js").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/javascript"
        );
    }

    #[tokio::test]
    async fn test_parse_resume_end_to_end() {
        let fakes = FakeServices::start().await;
        let body = multipart_body(Some(("resume.pdf", b"%PDF-1.4 fake".as_slice())), &[]);

        let response = build_router(fakes.state())
            .oneshot(multipart_request("/api/v1/parse-resume", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = extract_json(response).await;
        assert_eq!(body["status"], "success");
        assert_eq!(
            body["resume_data"]["text"],
            "Experience\n\nBuilt X.\n\nEducation\n\nBS CS."
        );
        assert_eq!(
            body["resume_data"]["sections"],
            json!({"Experience": ["Built X."], "Education": ["BS CS."]})
        );
    }

    #[tokio::test]
    async fn test_parse_resume_rejects_non_pdf_without_calling_parser() {
        let fakes = FakeServices::start().await;
        let body = multipart_body(Some(("resume.docx", b"PK\x03\x04".as_slice())), &[]);

        let response = build_router(fakes.state())
            .oneshot(multipart_request("/api/v1/parse-resume", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = extract_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Only PDF files are supported");
        assert_eq!(fakes.parser_calls(), 0);
    }

    #[tokio::test]
    async fn test_parse_resume_missing_file_field() {
        let fakes = FakeServices::start().await;
        let body = multipart_body(None, &[("note", "hi")]);

        let response = build_router(fakes.state())
            .oneshot(multipart_request("/api/v1/parse-resume", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_parse_resume_over_upload_limit() {
        let fakes = FakeServices::start().await;
        let mut state = fakes.state();
        state.config.max_upload_bytes = 64;
        let big = vec![b'x'; 1024];
        let body = multipart_body(Some(("resume.pdf", big.as_slice())), &[]);

        let response = build_router(state)
            .oneshot(multipart_request("/api/v1/parse-resume", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(fakes.parser_calls(), 0);
    }

    #[tokio::test]
    async fn test_analyze_job_end_to_end() {
        let fakes = FakeServices::start().await;
        let response = build_router(fakes.state())
            .oneshot(json_request(
                "/api/v1/analyze-job",
                json!({"job_url": fakes.job_url("/job")}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = extract_json(response).await;
        assert_eq!(body["job_description"], "Hello World");
    }

    #[tokio::test]
    async fn test_analyze_job_non_2xx_is_500() {
        let fakes = FakeServices::start().await;
        let response = build_router(fakes.state())
            .oneshot(json_request(
                "/api/v1/analyze-job",
                json!({"job_url": fakes.job_url("/missing")}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = extract_json(response).await;
        assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
        assert!(body["error"]["message"].as_str().unwrap().contains("404"));
    }

    #[tokio::test]
    async fn test_evaluate_end_to_end() {
        let fakes = FakeServices::start().await;
        let response = build_router(fakes.state())
            .oneshot(json_request(
                "/api/v1/evaluate",
                json!({"resume_text": "Built X.", "job_description": "Hello World"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = extract_json(response).await;
        assert_eq!(body["analysis"]["match_score"], 78);
        assert_eq!(body["analysis"]["qualifications_match"], json!(["Built X"]));
        assert!(body["analysis"]["email_draft"].is_string());
        assert_eq!(fakes.completion_calls(), 1);
    }

    #[tokio::test]
    async fn test_evaluate_malformed_json_body_is_client_error() {
        let fakes = FakeServices::start().await;
        let response = build_router(fakes.state())
            .oneshot(json_request("/api/v1/evaluate", json!({"resume_text": "x"})))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
        assert_eq!(fakes.completion_calls(), 0);
    }

    #[tokio::test]
    async fn test_run_pipeline_success() {
        let fakes = FakeServices::start().await;
        let job_url = fakes.job_url("/job");
        let body = multipart_body(
            Some(("resume.pdf", b"%PDF-1.4 fake".as_slice())),
            &[("job_url", job_url.as_str())],
        );

        let response = build_router(fakes.state())
            .oneshot(multipart_request("/api/v1/run", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = extract_json(response).await;
        assert_eq!(body["job_description"], "Hello World");
        assert_eq!(body["analysis"]["match_score"], 78);
        assert_eq!(
            body["resume_data"]["sections"]["Education"],
            json!(["BS CS."])
        );
    }

    #[tokio::test]
    async fn test_run_pipeline_non_2xx_job_never_reaches_evaluation() {
        let fakes = FakeServices::start().await;
        let job_url = fakes.job_url("/missing");
        let body = multipart_body(
            Some(("resume.pdf", b"%PDF-1.4 fake".as_slice())),
            &[("job_url", job_url.as_str())],
        );

        let response = build_router(fakes.state())
            .oneshot(multipart_request("/api/v1/run", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = extract_json(response).await;
        assert_eq!(body["error"]["step"], 2);
        assert_eq!(body["error"]["step_name"], "fetch_job");
        assert_eq!(fakes.parser_calls(), 1);
        assert_eq!(fakes.completion_calls(), 0);
    }

    #[tokio::test]
    async fn test_run_pipeline_non_pdf_stops_at_step_one() {
        let fakes = FakeServices::start().await;
        let job_url = fakes.job_url("/job");
        let body = multipart_body(
            Some(("resume.txt", b"plain".as_slice())),
            &[("job_url", job_url.as_str())],
        );

        let response = build_router(fakes.state())
            .oneshot(multipart_request("/api/v1/run", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = extract_json(response).await;
        assert_eq!(body["error"]["step"], 1);
        assert_eq!(fakes.parser_calls(), 0);
        assert_eq!(fakes.job_fetches(), 0);
        assert_eq!(fakes.completion_calls(), 0);
    }

    #[tokio::test]
    async fn test_run_pipeline_non_pdf_without_job_url_is_step_one() {
        let fakes = FakeServices::start().await;
        let body = multipart_body(Some(("resume.txt", b"plain".as_slice())), &[]);

        let response = build_router(fakes.state())
            .oneshot(multipart_request("/api/v1/run", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = extract_json(response).await;
        assert_eq!(body["error"]["step"], 1);
        assert_eq!(body["error"]["step_name"], "parse_resume");
        assert_eq!(body["error"]["message"], "Only PDF files are supported");
        assert_eq!(fakes.parser_calls(), 0);
    }

    #[tokio::test]
    async fn test_run_pipeline_pdf_without_job_url_is_step_two() {
        let fakes = FakeServices::start().await;
        let body = multipart_body(Some(("resume.pdf", b"%PDF-1.4".as_slice())), &[]);

        let response = build_router(fakes.state())
            .oneshot(multipart_request("/api/v1/run", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = extract_json(response).await;
        assert_eq!(body["error"]["step"], 2);
        assert_eq!(body["error"]["step_name"], "fetch_job");
        assert_eq!(fakes.parser_calls(), 0);
    }
}
