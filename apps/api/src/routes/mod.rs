pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::evaluation::handlers as evaluation;
use crate::ingest::handlers as ingest;
use crate::state::AppState;

/// Resumes larger than this are rejected before extraction.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Candidate ingestion
        .route(
            "/api/v1/candidates",
            post(ingest::handle_upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        // Evaluation
        .route(
            "/api/v1/evaluations",
            post(evaluation::handle_evaluate).get(evaluation::handle_list_evaluations),
        )
        .route(
            "/api/v1/evaluations/:id",
            get(evaluation::handle_get_evaluation),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::evaluation::criteria::CriterionRegistry;
    use crate::evaluation::testing::{
        FixedEmbedder, MemoryResultStore, ScriptedLanguageModel, StaticRetriever,
    };
    use crate::ingest::index::ChunkIndex;

    fn test_config() -> Config {
        Config {
            database_url: "postgres://localhost/shortlist_test".to_string(),
            ollama_host: "http://localhost:11434".to_string(),
            model: "recruiter-gemma3:270m".to_string(),
            embed_model: "nomic-embed-text".to_string(),
            criteria_path: None,
            llm_timeout_secs: 5,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }

    /// Router over in-memory collaborators; the pool is never actually connected.
    fn test_app(llm_response: &str) -> Router {
        let config = test_config();
        let pool = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .unwrap();
        let state = AppState {
            config,
            registry: Arc::new(CriterionRegistry::default()),
            llm: Arc::new(ScriptedLanguageModel::always(llm_response)),
            retriever: Arc::new(StaticRetriever::with_passages(&["MSc Computer Science, 6y Python"])),
            store: Arc::new(MemoryResultStore::new()),
            index: Arc::new(ChunkIndex::new(pool, Arc::new(FixedEmbedder))),
        };
        build_router(state)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn evaluate_request(candidate_id: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/evaluations")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "candidate_id": candidate_id }).to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_models() {
        let app = test_app("{}");
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["model"], "recruiter-gemma3:270m");
        assert_eq!(body["embed_model"], "nomic-embed-text");
    }

    #[tokio::test]
    async fn test_evaluate_then_fetch_and_list() {
        let app = test_app(r#"{"score_percent": 80, "rationale": "clear evidence"}"#);

        let response = app.clone().oneshot(evaluate_request("cand-1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let created = body_json(response).await;
        assert_eq!(created["id"], 1);
        assert_eq!(created["candidate_id"], "cand-1");
        assert_eq!(created["overall_percent"], 80.0);
        assert_eq!(created["summary"]["overall_comment"], "Strong match");
        assert_eq!(created["judgments"].as_array().unwrap().len(), 4);

        let response = app
            .clone()
            .oneshot(Request::get("/api/v1/evaluations/1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, created);

        let response = app
            .oneshot(Request::get("/api/v1/evaluations").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listing = body_json(response).await;
        assert_eq!(listing.as_array().unwrap().len(), 1);
        assert_eq!(listing[0]["candidate_id"], "cand-1");
    }

    #[tokio::test]
    async fn test_blank_candidate_is_rejected() {
        let app = test_app("{}");
        let response = app.oneshot(evaluate_request("   ")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_result_is_404() {
        let app = test_app("{}");
        let response = app
            .oneshot(Request::get("/api/v1/evaluations/42").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_upload_rejects_non_pdf() {
        let app = test_app("{}");
        let boundary = "resume-boundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"cv.txt\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             Jane Doe, Python\r\n\
             --{boundary}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/candidates")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Please upload a PDF.");
    }
}
