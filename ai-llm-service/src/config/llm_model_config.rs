use std::time::Duration;

/// Configuration for the chat-completion endpoint.
///
/// Built once at startup (see [`LlmModelConfig::from_env`](super::default_config))
/// and passed by reference to every component that talks to the LLM.
///
/// # Fields
///
/// - `base_url`: API root including the version segment (e.g. `http://localhost:11434/v1`).
/// - `api_key`: Optional bearer token; no `Authorization` header when `None`.
/// - `model`: The model identifier sent with every request.
/// - `max_tokens`: Output token budget per answer.
/// - `temperature`: Sampling temperature (0.0 = deterministic).
/// - `timeout_secs`: Request timeout in seconds.
///
/// # Examples
///
/// ```
/// use ai_llm_service::LlmModelConfig;
///
/// let cfg = LlmModelConfig {
///     base_url: "http://localhost:11434/v1".to_string(),
///     api_key: None,
///     model: "qwen3:14b".to_string(),
///     max_tokens: 2048,
///     temperature: 0.7,
///     timeout_secs: 60,
/// };
/// assert_eq!(cfg.chat_completions_url(), "http://localhost:11434/v1/chat/completions");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// API root including the version segment.
    pub base_url: String,

    /// Optional API key for bearer authentication.
    pub api_key: Option<String>,

    /// Model identifier string.
    pub model: String,

    /// Maximum number of tokens to generate.
    pub max_tokens: u32,

    /// Sampling temperature.
    pub temperature: f32,

    /// Request timeout (in seconds).
    pub timeout_secs: u64,
}

impl LlmModelConfig {
    /// `{base_url}/chat/completions`.
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Tags-listing URL used for reachability checks: every `/v1` in the base
    /// URL is replaced by `/api/tags`.
    pub fn tags_url(&self) -> String {
        self.base_url.replace("/v1", "/api/tags")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
