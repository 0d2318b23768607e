use tracing::{error, info, warn};

use crate::{
    core::app_state::AppState, error_handler::AppResult, routes::ask::ask_request::AskResponse,
};

/// Characters of the question echoed into the log.
const LOG_PREVIEW_CHARS: usize = 50;

/// Asks with the code-review prompt, or `fallback` when that prompt is empty.
pub async fn answer_with_review_prompt(
    state: &AppState,
    route: &'static str,
    question: String,
    fallback: &str,
) -> AppResult<AskResponse> {
    let preview: String = question.chars().take(LOG_PREVIEW_CHARS).collect();
    let prompt_file = state.prompts.code_review.path.display().to_string();
    info!(route, question = %preview, %prompt_file, "question received");

    let system_prompt = if state.prompts.code_review.content.is_empty() {
        warn!(route, "code-review prompt is empty, using fallback");
        fallback
    } else {
        state.prompts.code_review.content.as_str()
    };

    let answer = state
        .chat
        .ask(&question, Some(system_prompt))
        .await
        .inspect_err(|err| error!(route, error = %err, "question failed"))?;

    info!(route, tokens = answer.tokens_used, "answer generated");

    Ok(AskResponse {
        success: true,
        question,
        prompt_length: answer.used_prompt.chars().count(),
        answer: answer.answer,
        model: answer.model,
        used_prompt: answer.used_prompt,
    })
}
