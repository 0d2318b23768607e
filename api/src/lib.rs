//! HTTP surface of the review relay.
//!
//! | route | purpose |
//! |---|---|
//! | `GET /` | service info |
//! | `GET /health` | liveness |
//! | `GET /api/test/?question=` | ask with the code-review prompt |
//! | `POST /api/review/` | code review, `{"question": ...}` |
//! | `GET /api/prompts/` | prompt in use |
//! | `GET /api/health` | prompt + LLM reachability |

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

mod core;
mod error_handler;
mod middleware_layer;
mod routes;

pub use crate::core::{app_state::AppState, config::ServerConfig};
pub use crate::error_handler::{AppError, AppResult};

use crate::{
    middleware_layer::json_extractor::json_error_mapper,
    routes::{
        ask::{review_question_route::review_question, test_question_route::test_question},
        health_check_route::health_check,
        prompt_info_route::prompt_info,
        status_route::{liveness, root},
    },
};

/// All routes with request-rejection mapping and permissive CORS.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(liveness))
        .route("/api/test/", get(test_question))
        .route("/api/test", get(test_question))
        .route("/api/review/", post(review_question))
        .route("/api/review", post(review_question))
        .route("/api/prompts/", get(prompt_info))
        .route("/api/prompts", get(prompt_info))
        .route("/api/health", get(health_check))
        .layer(middleware::from_fn(json_error_mapper))
        .layer(cors)
        .with_state(state)
}

/// Builds state from the environment and serves until Ctrl+C.
///
/// # Errors
/// Configuration, client, bind and serve failures.
pub async fn start(config: ServerConfig) -> AppResult<()> {
    let addr = config.bind_addr();
    let state = Arc::new(AppState::from_env(config)?);
    let app = build_router(state.clone());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| AppError::Bind {
            addr: addr.clone(),
            source,
        })?;

    info!(
        %addr,
        model = %state.llm().model,
        llm_url = %state.llm().base_url,
        prompt_file = %state.prompts.code_review.path.display(),
        debug = state.server.debug,
        "server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl+C.
async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        // Without a signal handler the server runs until killed.
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use ai_llm_service::{LlmModelConfig, PromptSource, PromptStore};
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::{AppState, Arc, Router, ServerConfig, build_router};
    use crate::core::config::{DEFAULT_REVIEW_FALLBACK_PROMPT, DEFAULT_TEST_FALLBACK_PROMPT};

    fn prompts(review: &str) -> PromptStore {
        PromptStore {
            system: PromptSource {
                path: "system.txt".into(),
                content: String::new(),
            },
            code_review: PromptSource {
                path: "review.txt".into(),
                content: review.to_string(),
            },
        }
    }

    fn app(llm_uri: &str, review_prompt: &str) -> Router {
        app_with(ServerConfig::default(), llm_uri, review_prompt)
    }

    fn app_with(server: ServerConfig, llm_uri: &str, review_prompt: &str) -> Router {
        let llm = LlmModelConfig {
            base_url: format!("{llm_uri}/v1"),
            model: "test-model".into(),
            timeout_secs: 5,
            ..LlmModelConfig::default()
        };
        let state = AppState::new(server, llm, prompts(review_prompt)).unwrap();
        build_router(Arc::new(state))
    }

    async fn call(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn mount_completion(server: &MockServer, system: &str, answer: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(json!({
                "messages": [{ "role": "system", "content": system }, { "role": "user" }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "role": "assistant", "content": answer } }],
                "usage": { "total_tokens": 42 }
            })))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn root_and_liveness_report_model() {
        let (status, body) = call(app("http://127.0.0.1:9", "Review well."), get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "active");
        assert_eq!(body["model"], "test-model");
        assert_eq!(body["prompt_sources"]["code_review"], "Review well.");

        let (_, body) = call(app("http://127.0.0.1:9", ""), get("/health")).await;
        assert_eq!(body, json!({ "status": "healthy", "model": "test-model" }));
    }

    #[tokio::test]
    async fn review_uses_prompt_from_file() {
        let server = MockServer::start().await;
        mount_completion(&server, "Review well.", "Looks good").await;

        let (status, body) = call(
            app(&server.uri(), "Review well."),
            post_json("/api/review/", json!({ "question": "fn main() {}" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "success": true,
                "question": "fn main() {}",
                "answer": "Looks good",
                "model": "test-model",
                "used_prompt": "Review well.",
                "prompt_length": 12
            })
        );
    }

    #[tokio::test]
    async fn test_endpoint_falls_back_when_prompt_is_empty() {
        let server = MockServer::start().await;
        mount_completion(&server, DEFAULT_TEST_FALLBACK_PROMPT, "Hi").await;

        let (status, body) = call(app(&server.uri(), ""), get("/api/test/?question=hello")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["used_prompt"], DEFAULT_TEST_FALLBACK_PROMPT);
        assert_eq!(
            body["prompt_length"],
            DEFAULT_TEST_FALLBACK_PROMPT.chars().count()
        );
        assert_eq!(body["answer"], "Hi");
    }

    #[tokio::test]
    async fn review_endpoint_falls_back_to_reviewer_persona() {
        let server = MockServer::start().await;
        mount_completion(&server, DEFAULT_REVIEW_FALLBACK_PROMPT, "ok").await;

        let (status, body) = call(
            app(&server.uri(), ""),
            post_json("/api/review/", json!({ "question": "fn main() {}" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["used_prompt"], DEFAULT_REVIEW_FALLBACK_PROMPT);
    }

    #[tokio::test]
    async fn fallback_personas_are_configurable() {
        let server = MockServer::start().await;
        mount_completion(&server, "Be brief.", "ok").await;
        let config = ServerConfig {
            test_fallback_prompt: "Be brief.".into(),
            ..ServerConfig::default()
        };

        let (_, body) = call(
            app_with(config, &server.uri(), ""),
            get("/api/test/?question=hello"),
        )
        .await;

        assert_eq!(body["used_prompt"], "Be brief.");
        assert_eq!(body["prompt_length"], 9);
    }

    #[tokio::test]
    async fn upstream_failure_is_500_with_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let (status, body) = call(
            app(&server.uri(), "p"),
            post_json("/api/review/", json!({ "question": "q" })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "LLM_UPSTREAM_ERROR");
        assert!(body["detail"].as_str().unwrap().contains("502"));
    }

    #[tokio::test]
    async fn missing_question_is_wrapped_in_envelope() {
        let (status, body) = call(app("http://127.0.0.1:9", "p"), get("/api/test/")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
        assert_eq!(body["error"]["details"][0]["path"], "question");
    }

    #[tokio::test]
    async fn wrong_body_type_is_unprocessable() {
        let (status, body) = call(
            app("http://127.0.0.1:9", "p"),
            post_json("/api/review/", json!({ "question": 5 })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
    }

    #[tokio::test]
    async fn prompts_endpoint_shows_source_path() {
        let long = "p".repeat(250);
        let (status, body) = call(app("http://127.0.0.1:9", &long), get("/api/prompts/")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["prompt_info"]["source_file"], "review.txt");
        assert_eq!(body["prompt_info"]["length"], 250);
        assert_eq!(
            body["prompt_info"]["preview"],
            format!("{}...", "p".repeat(200))
        );
        assert_eq!(body["ollama_url"], "http://127.0.0.1:9/v1");
    }

    #[tokio::test]
    async fn health_is_healthy_when_prompt_and_llm_are_up() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "models": [] })))
            .mount(&server)
            .await;

        let (status, body) = call(app(&server.uri(), "p"), get("/api/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["prompt_loaded"], true);
        assert_eq!(body["ollama_connected"], true);
    }

    #[tokio::test]
    async fn health_degrades_without_llm() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let (_, body) = call(app(&server.uri(), "p"), get("/api/health")).await;
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["ollama_connected"], false);

        let (_, body) = call(app(&server.uri(), "  "), get("/api/health")).await;
        assert_eq!(body["status"], "unhealthy");
    }
}
