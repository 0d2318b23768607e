use serde::{Deserialize, Serialize};

/// Query for GET /api/test/.
#[derive(Debug, Deserialize)]
pub struct AskQuery {
    pub question: String,
}

/// Body for POST /api/review/.
#[derive(Debug, Deserialize)]
pub struct AskBody {
    pub question: String,
}

/// Response for both question endpoints.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub success: bool,
    pub question: String,
    /// Model answer (plain text).
    pub answer: String,
    pub model: String,
    /// System prompt that was sent with the question.
    pub used_prompt: String,
    /// Length of `used_prompt` in characters.
    pub prompt_length: usize,
}
