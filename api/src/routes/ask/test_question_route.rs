//! GET /api/test/?question=: asks the LLM with the code-review prompt.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::ask::{
        answer_question::answer_with_review_prompt,
        ask_request::{AskQuery, AskResponse},
    },
};

/// Handler: GET /api/test/
///
/// # Example
/// ```bash
/// curl 'http://127.0.0.1:8000/api/test/?question=What%20is%20a%20borrow%20checker'
/// ```
pub async fn test_question(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AskQuery>,
) -> AppResult<Json<AskResponse>> {
    answer_with_review_prompt(
        &state,
        "GET /api/test/",
        query.question,
        &state.server.test_fallback_prompt,
    )
    .await
    .map(Json)
}
