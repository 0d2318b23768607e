use ai_llm_service::{AiLlmError, TransportError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("configuration error: {0}")]
    Config(#[source] AiLlmError),

    #[error("failed to initialize HTTP client: {0}")]
    Client(#[source] TransportError),

    // --- IO / server ---
    #[error("failed to bind listener on {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request handling ---
    /// Any fault while answering a question.
    #[error("{0}")]
    Llm(#[from] AiLlmError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        // Every fault reaching a handler is reported as 500.
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Client(_) => "CLIENT_ERROR",
            AppError::Bind { .. } => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::Llm(err) => llm_error_code(err),
        }
    }
}

fn llm_error_code(err: &AiLlmError) -> &'static str {
    match err {
        AiLlmError::Transport(TransportError::Timeout(_)) => "LLM_TIMEOUT",
        AiLlmError::Transport(_) => "LLM_UNREACHABLE",
        AiLlmError::Upstream(_) => "LLM_UPSTREAM_ERROR",
        AiLlmError::Decode(_) | AiLlmError::EmptyChoices => "LLM_BAD_RESPONSE",
        _ => "LLM_ERROR",
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.error_code(),
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;
