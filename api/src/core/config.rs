//! Web-surface settings.
//!
//! - `HOST`  = bind address (default `127.0.0.1`)
//! - `PORT`  = bind port (default `8000`)
//! - `DEBUG` = verbose logging (default `true`)
//! - `AI_TEST_FALLBACK_PROMPT` / `AI_REVIEW_FALLBACK_PROMPT` = personas used
//!   by `/api/test/` and `/api/review/` when the code-review prompt is empty

use ai_llm_service::error_handler::{Result, env_flag, env_or, env_parse_or};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;

/// "You are a helpful AI assistant."
pub const DEFAULT_TEST_FALLBACK_PROMPT: &str = "Bạn là một trợ lý AI hữu ích.";
/// "You are a code review expert."
pub const DEFAULT_REVIEW_FALLBACK_PROMPT: &str = "Bạn là một chuyên gia review code.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub test_fallback_prompt: String,
    pub review_fallback_prompt: String,
}

impl ServerConfig {
    /// # Errors
    /// Fails only when `PORT` is present but not a valid `u16`.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env_or("HOST", DEFAULT_HOST),
            port: env_parse_or("PORT", DEFAULT_PORT, "expected u16")?,
            debug: env_flag("DEBUG", true),
            test_fallback_prompt: env_or("AI_TEST_FALLBACK_PROMPT", DEFAULT_TEST_FALLBACK_PROMPT),
            review_fallback_prompt: env_or(
                "AI_REVIEW_FALLBACK_PROMPT",
                DEFAULT_REVIEW_FALLBACK_PROMPT,
            ),
        })
    }

    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            debug: true,
            test_fallback_prompt: DEFAULT_TEST_FALLBACK_PROMPT.to_string(),
            review_fallback_prompt: DEFAULT_REVIEW_FALLBACK_PROMPT.to_string(),
        }
    }
}
