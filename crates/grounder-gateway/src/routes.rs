//! API route handlers for the gateway.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use super::server::AppState;

/// Health check endpoint.
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "grounder-gateway",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// System information endpoint.
pub async fn system_info(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let uptime = state.start_time.elapsed();
    Json(serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": uptime.as_secs(),
        "corpus_documents": state.engine.corpus_size(),
        "synonym_topics": state.engine.synonym_topics(),
        "model": state.engine.model_name(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct AskParams {
    #[serde(default)]
    query: Option<String>,
}

/// The query endpoint: retrieve context, ask the model, return everything.
///
/// A failed completion still answers 200 — the placeholder text sits in
/// `ai_reply` (callers wanting to tell the two apart must inspect it; the
/// logs carry the real error). Only a missing query is a client error.
pub async fn ask(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AskParams>,
) -> Response {
    let Some(query) = params.query.filter(|q| !q.trim().is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"ok": false, "error": "Missing 'query' parameter"})),
        )
            .into_response();
    };

    let answer = state.engine.answer(&query).await;
    Json(serde_json::json!({
        "query": answer.query,
        "context": answer.context,
        "score": answer.score,
        "ai_reply": answer.reply,
    }))
    .into_response()
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    query: String,
}

/// Retrieval only: best context and score, no model call.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Response {
    if req.query.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"ok": false, "error": "Missing 'query' field"})),
        )
            .into_response();
    }

    let best = state.engine.search(&req.query).await;
    Json(serde_json::json!({
        "query": req.query,
        "context": best.document.map(|d| d.text),
        "score": best.score,
        "matched": best.index.is_some(),
    }))
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::build_router;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use grounder_core::error::Result;
    use grounder_core::traits::CompletionBackend;
    use grounder_corpus::{Corpus, SynonymTable};
    use grounder_engine::Engine;

    struct CannedBackend;

    #[async_trait]
    impl CompletionBackend for CannedBackend {
        fn name(&self) -> &str {
            "canned"
        }

        fn model(&self) -> &str {
            "canned-model"
        }

        async fn complete(&self, _prompt: &str) -> Result<String> {
            Ok("canned reply".to_string())
        }
    }

    fn test_router() -> axum::Router {
        let engine = Engine::new(
            Arc::new(Corpus::from_lines(["rust rocks", "tea is warm"])),
            Arc::new(SynonymTable::default()),
            Box::new(CannedBackend),
            2,
        );
        build_router(Arc::new(AppState {
            engine: Arc::new(engine),
            start_time: std::time::Instant::now(),
        }))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_info_reports_corpus_and_model() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/info")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["corpus_documents"], 2);
        assert_eq!(json["model"], "canned-model");
    }

    #[tokio::test]
    async fn test_ask_missing_query_is_bad_request() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/ask")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["ok"], false);
    }

    #[tokio::test]
    async fn test_ask_returns_full_answer_shape() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/ask?query=rust")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["query"], "rust");
        assert_eq!(json["context"], "rust rocks");
        assert_eq!(json["score"], 10.0);
        assert_eq!(json["ai_reply"], "canned reply");
    }

    #[tokio::test]
    async fn test_ask_no_match_has_null_context() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/ask?query=zzzzz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        assert!(json["context"].is_null());
        assert_eq!(json["score"], 0.0);
        assert_eq!(json["ai_reply"], "canned reply");
    }

    #[tokio::test]
    async fn test_search_does_not_call_model() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/search")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"query": "tea"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["context"], "tea is warm");
        assert_eq!(json["matched"], true);
        assert!(json.get("ai_reply").is_none());
    }

    #[tokio::test]
    async fn test_search_empty_query_is_bad_request() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/search")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"query": "  "}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
