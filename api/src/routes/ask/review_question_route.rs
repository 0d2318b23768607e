//! POST /api/review/: code review with the prompt from file.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::ask::{
        answer_question::answer_with_review_prompt,
        ask_request::{AskBody, AskResponse},
    },
};

/// Handler: POST /api/review/
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/api/review/ \
///   -H 'content-type: application/json' \
///   -d '{"question":"Please review: fn main() { let x = 1; }"}'
/// ```
pub async fn review_question(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AskBody>,
) -> AppResult<Json<AskResponse>> {
    answer_with_review_prompt(
        &state,
        "POST /api/review/",
        body.question,
        &state.server.review_fallback_prompt,
    )
    .await
    .map(Json)
}
