pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction::handlers::handle_upload_resume;
use crate::generation::handlers::handle_generate_resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/upload_resume",
            post(handle_upload_resume).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/generate_resume", post(handle_generate_resume))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::llm_client::LlmError;
    use crate::testing::{test_state, StubLlm};

    const BOUNDARY: &str = "X-RESUME-TEST-BOUNDARY";

    fn multipart_request(field: &str, contents: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"cv.pdf\"\r\n\
                 Content-Type: application/pdf\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(contents);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/upload_resume")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn generate_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/generate_resume")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let app = build_router(test_state(Arc::new(StubLlm::replying("unused"))));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_upload_without_resume_field_is_400() {
        let llm = Arc::new(StubLlm::replying("unused"));
        let app = build_router(test_state(llm.clone()));

        let response = app
            .oneshot(multipart_request("document", b"%PDF-1.4 stub"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "MISSING_INPUT");
        assert!(body["error"]["message"].as_str().unwrap().contains("resume"));
        assert!(llm.calls().is_empty());
    }

    #[tokio::test]
    async fn test_upload_over_body_limit_is_413() {
        let llm = Arc::new(StubLlm::replying("unused"));
        let mut state = test_state(llm.clone());
        state.config.max_upload_bytes = 1024;
        let app = build_router(state);

        let response = app
            .oneshot(multipart_request("resume", &[b'A'; 4096]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
        assert!(llm.calls().is_empty());
    }

    #[tokio::test]
    async fn test_upload_with_broken_multipart_body_is_400() {
        let llm = Arc::new(StubLlm::replying("unused"));
        let app = build_router(test_state(llm.clone()));

        let request = Request::builder()
            .method("POST")
            .uri("/upload_resume")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"\r\n\r\nunterminated"
            )))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "MALFORMED_REQUEST");
        assert!(llm.calls().is_empty());
    }

    #[tokio::test]
    async fn test_upload_returns_message_and_metadata() {
        let llm = Arc::new(StubLlm::replying("Name: Ada Lovelace\nSkills: mathematics"));
        let app = build_router(test_state(llm.clone()));

        let response = app
            .oneshot(multipart_request("resume", b"Ada Lovelace\nMathematician"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Resume uploaded and processed successfully");
        assert_eq!(body["metadata"], "Name: Ada Lovelace\nSkills: mathematics");
        assert_eq!(llm.calls()[0].user, "Ada Lovelace\nMathematician");
    }

    #[tokio::test]
    async fn test_upload_upstream_failure_is_500() {
        let llm = Arc::new(StubLlm::failing(|| LlmError::Api {
            status: 400,
            message: "context length exceeded".to_string(),
        }));
        let app = build_router(test_state(llm));

        let response = app
            .oneshot(multipart_request("resume", b"Ada Lovelace"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("context length exceeded"));
    }

    #[tokio::test]
    async fn test_generate_over_budget_is_400_without_llm_call() {
        let llm = Arc::new(StubLlm::replying("unused"));
        let app = build_router(test_state(llm.clone()));

        let response = app
            .oneshot(generate_request(json!({
                "job_qualifications": "Rust and distributed systems. ".repeat(2000),
                "name": "Ada",
                "company": "Acme"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "INPUT_TOO_LARGE");
        assert!(llm.calls().is_empty());
    }

    #[tokio::test]
    async fn test_generate_rate_limited_is_429() {
        let llm = Arc::new(StubLlm::failing(|| LlmError::RateLimited {
            message: "quota".to_string(),
        }));
        let app = build_router(test_state(llm.clone()));

        let response = app
            .oneshot(generate_request(json!({
                "job_qualifications": "Rust",
                "name": "Ada",
                "company": "Acme"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(llm.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_generate_returns_pdf_attachment() {
        let llm = Arc::new(StubLlm::replying("ADA LOVELACE\nAnalytical Engine Programmer"));
        let app = build_router(test_state(llm));

        let response = app
            .oneshot(generate_request(json!({
                "job_qualifications": "Mathematics, algorithm design",
                "name": "Ada Lovelace",
                "company": "Acme Corp"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment;"));
        assert!(disposition.contains("Ada_Lovelace"));
        assert!(disposition.contains("Acme_Corp"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(!bytes.is_empty());
    }
}
