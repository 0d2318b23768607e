//! Shared LLM gateway for the review relay.
//!
//! - [`config`]: model/endpoint settings and prompt files, read once from env.
//! - [`transport`]: the HTTP seam every outbound call goes through.
//! - [`services::chat_completion_service`]: question + system prompt → answer.
//! - [`health_service`]: best-effort reachability probe for the endpoint.
//! - [`telemetry`]: `tracing-subscriber` helpers for binaries.

pub mod config;
pub mod error_handler;
pub mod health_service;
pub mod services;
pub mod telemetry;
pub mod transport;

pub use config::llm_model_config::LlmModelConfig;
pub use config::prompt_store::{PromptSource, PromptStore};
pub use error_handler::{AiLlmError, Result};
pub use services::chat_completion_service::{ChatCompletionService, LlmAnswer};
pub use transport::{HttpTransport, ReqwestTransport, TransportError, TransportRequest, TransportResponse};
