//! GET /api/prompts/: the code-review prompt in use.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::app_state::AppState;

/// Characters shown in `preview` before the ellipsis.
pub const PREVIEW_CHARS: usize = 200;

#[derive(Debug, Serialize)]
pub struct PromptInfo {
    pub source_file: String,
    pub content: String,
    /// Length of `content` in characters.
    pub length: usize,
    pub preview: String,
}

#[derive(Debug, Serialize)]
pub struct PromptInfoResponse {
    pub success: bool,
    pub prompt_info: PromptInfo,
    pub model: String,
    pub ollama_url: String,
}

/// First [`PREVIEW_CHARS`] characters, plus `...` when the text is longer.
pub fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

/// Handler: GET /api/prompts/
pub async fn prompt_info(State(state): State<Arc<AppState>>) -> Json<PromptInfoResponse> {
    let source = &state.prompts.code_review;
    let llm = state.llm();

    Json(PromptInfoResponse {
        success: true,
        prompt_info: PromptInfo {
            source_file: source.path.display().to_string(),
            content: source.content.clone(),
            length: source.char_len(),
            preview: preview(&source.content),
        },
        model: llm.model.clone(),
        ollama_url: llm.base_url.clone(),
    })
}
