//! Default LLM config loaded from environment variables.
//!
//! Every variable is optional; absent or blank values fall back to the
//! defaults below. A value that is present but malformed is a startup error.
//!
//! # Environment variables
//!
//! - `OLLAMA_BASE_URL` = API root with version segment (default `http://localhost:11434/v1`)
//! - `OLLAMA_API_KEY`  = bearer token (default: none)
//! - `OLLAMA_MODEL`    = model identifier (default `gemini/gemini-2.0-flash-lite`)
//! - `AI_MAX_TOKENS`   = output token budget, u32 (default `4000`)
//! - `AI_TEMPERATURE`  = sampling temperature, `0.0..=2.0` (default `0.7`)
//! - `AI_TIMEOUT_SECS` = request timeout, u64 (default `60`)

use tracing::info;

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{
        ConfigError, Result, env_opt, env_or, env_parse_or, validate_http_endpoint,
        validate_range_f32,
    },
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434/v1";
pub const DEFAULT_MODEL: &str = "gemini/gemini-2.0-flash-lite";
pub const DEFAULT_MAX_TOKENS: u32 = 4000;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

impl LlmModelConfig {
    /// Reads the LLM settings from the process environment.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidNumber`] for unparsable numeric variables
    /// - [`ConfigError::InvalidFormat`] if the base URL lacks an http(s) scheme
    /// - [`ConfigError::OutOfRange`] if the temperature is outside `0.0..=2.0`
    pub fn from_env() -> Result<Self> {
        let cfg = Self {
            base_url: env_or("OLLAMA_BASE_URL", DEFAULT_BASE_URL),
            api_key: env_opt("OLLAMA_API_KEY"),
            model: env_or("OLLAMA_MODEL", DEFAULT_MODEL),
            max_tokens: env_parse_or("AI_MAX_TOKENS", DEFAULT_MAX_TOKENS, "expected u32")?,
            temperature: env_parse_or("AI_TEMPERATURE", DEFAULT_TEMPERATURE, "expected f32")?,
            timeout_secs: env_parse_or("AI_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS, "expected u64")?,
        };
        cfg.validate()?;

        info!(
            base_url = %cfg.base_url,
            model = %cfg.model,
            max_tokens = cfg.max_tokens,
            temperature = cfg.temperature,
            has_api_key = cfg.api_key.is_some(),
            "LLM config loaded"
        );
        Ok(cfg)
    }

    /// Checks scheme, model and temperature.
    pub fn validate(&self) -> Result<()> {
        validate_http_endpoint("OLLAMA_BASE_URL", &self.base_url)?;
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }
        validate_range_f32("temperature", self.temperature, 0.0, 2.0)
    }
}

impl Default for LlmModelConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
