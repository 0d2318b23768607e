//! GET / and GET /health: static service info.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::app_state::AppState;

pub const SERVICE_MESSAGE: &str = "LLM API Server with File-Based Prompt";

#[derive(Debug, Serialize)]
pub struct PromptSources {
    pub code_review: String,
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub status: &'static str,
    pub model: String,
    pub prompt_sources: PromptSources,
}

#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub status: &'static str,
    pub model: String,
}

/// Handler: GET /
pub async fn root(State(state): State<Arc<AppState>>) -> Json<RootResponse> {
    Json(RootResponse {
        message: SERVICE_MESSAGE,
        status: "active",
        model: state.llm().model.clone(),
        prompt_sources: PromptSources {
            code_review: state.prompts.code_review.content.clone(),
        },
    })
}

/// Handler: GET /health
pub async fn liveness(State(state): State<Arc<AppState>>) -> Json<LivenessResponse> {
    Json(LivenessResponse {
        status: "healthy",
        model: state.llm().model.clone(),
    })
}
