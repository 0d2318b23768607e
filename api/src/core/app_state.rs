use ai_llm_service::{
    ChatCompletionService, LlmModelConfig, PromptStore, ReqwestTransport,
    health_service::HealthService,
};

use crate::{core::config::ServerConfig, error_handler::AppError};

/// Shared state for all HTTP handlers. Built once at startup.
pub struct AppState {
    pub server: ServerConfig,
    /// Prompts read from disk at startup; never re-read.
    pub prompts: PromptStore,
    /// Chat gateway; its default system prompt is `prompts.system`.
    pub chat: ChatCompletionService<ReqwestTransport>,
    /// Reachability probe for the LLM endpoint.
    pub health: HealthService<ReqwestTransport>,
}

impl AppState {
    /// Reads LLM settings and prompt files from the environment.
    ///
    /// # Errors
    /// [`AppError::Config`] on malformed values, [`AppError::Client`] when
    /// the HTTP client cannot be built.
    pub fn from_env(server: ServerConfig) -> Result<Self, AppError> {
        let llm = LlmModelConfig::from_env().map_err(AppError::Config)?;
        let prompts = PromptStore::from_env();
        Self::new(server, llm, prompts)
    }

    pub fn new(server: ServerConfig, llm: LlmModelConfig, prompts: PromptStore) -> Result<Self, AppError> {
        let transport = ReqwestTransport::new().map_err(AppError::Client)?;
        let chat = ChatCompletionService::new(llm, transport.clone(), prompts.system.content.clone());
        let health = HealthService::new(transport, None);

        Ok(Self {
            server,
            prompts,
            chat,
            health,
        })
    }

    pub fn llm(&self) -> &LlmModelConfig {
        self.chat.config()
    }
}
