//! Chat-completion gateway: one question plus an optional system prompt in,
//! one answer plus usage metadata out.
//!
//! Minimal, non-streaming client for an OpenAI-compatible endpoint
//! (`POST {base_url}/chat/completions`). The HTTP exchange goes through an
//! [`HttpTransport`], so the contract is testable without a live endpoint.
//!
//! Nothing is retried or cached; each call either returns an [`LlmAnswer`] or
//! an [`AiLlmError`] describing why it failed.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{AiLlmError, HttpError, make_snippet},
    transport::{HttpTransport, TransportRequest},
};

/// Successful answer of a single [`ChatCompletionService::ask`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LlmAnswer {
    /// Assistant message content.
    pub answer: String,
    /// System prompt actually sent (empty when none was sent).
    pub used_prompt: String,
    /// Model identifier from the config.
    pub model: String,
    /// `usage.total_tokens`, or 0 when the endpoint does not report usage.
    pub tokens_used: u64,
}

/// Thin client for a chat-completions endpoint.
///
/// Holds the config, the transport and the default system prompt (the content
/// of `AI_SYSTEM_PROMPT_FILE`, loaded once at startup).
#[derive(Debug)]
pub struct ChatCompletionService<T> {
    transport: T,
    cfg: LlmModelConfig,
    url_chat: String,
    default_system_prompt: String,
}

impl<T: HttpTransport> ChatCompletionService<T> {
    pub fn new(cfg: LlmModelConfig, transport: T, default_system_prompt: impl Into<String>) -> Self {
        let url_chat = cfg.chat_completions_url();
        let default_system_prompt = default_system_prompt.into();

        info!(
            model = %cfg.model,
            endpoint = %url_chat,
            timeout_secs = cfg.timeout_secs,
            default_prompt_len = default_system_prompt.chars().count(),
            "ChatCompletionService initialized"
        );

        Self {
            transport,
            cfg,
            url_chat,
            default_system_prompt,
        }
    }

    pub fn config(&self) -> &LlmModelConfig {
        &self.cfg
    }

    /// Resolves the system prompt for a call: explicit if non-empty, otherwise
    /// the default one (which may itself be empty).
    pub fn resolve_system_prompt<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        match explicit {
            Some(p) if !p.is_empty() => p,
            _ => &self.default_system_prompt,
        }
    }

    /// Sends `question` (and a system message when the resolved prompt is
    /// non-empty) and returns the first choice's content.
    ///
    /// # Errors
    /// - [`AiLlmError::Transport`] when no response arrived (timeout, network)
    /// - [`AiLlmError::Upstream`] for non-2xx responses
    /// - [`AiLlmError::Decode`] if the JSON cannot be parsed
    /// - [`AiLlmError::EmptyChoices`] if no choice carries content
    #[instrument(name = "llm_ask", skip_all, fields(model = %self.cfg.model))]
    pub async fn ask(&self, question: &str, system_prompt: Option<&str>) -> Result<LlmAnswer, AiLlmError> {
        let started = Instant::now();
        let used_prompt = self.resolve_system_prompt(system_prompt);
        let body = ChatCompletionRequest::from_cfg(&self.cfg, question, used_prompt);
        let body = serde_json::to_value(&body).map_err(|e| AiLlmError::Decode(e.to_string()))?;

        let mut request = TransportRequest::post_json(&self.url_chat, body, self.cfg.timeout());
        if let Some(key) = &self.cfg.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }

        debug!(
            question_len = question.len(),
            system_len = used_prompt.len(),
            "POST {}", self.url_chat
        );

        let resp = self.transport.send(request).await?;

        if !resp.is_success() {
            let snippet = make_snippet(&resp.body);
            error!(
                status = resp.status,
                url = %self.url_chat,
                %snippet,
                latency_ms = started.elapsed().as_millis(),
                "chat completion returned non-success status"
            );
            return Err(AiLlmError::Upstream(HttpError {
                status: resp.status,
                url: self.url_chat.clone(),
                snippet,
            }));
        }

        let out: ChatCompletionResponse = resp.json().map_err(|e| {
            error!(
                error = %e,
                latency_ms = started.elapsed().as_millis(),
                "failed to decode chat completion response"
            );
            AiLlmError::Decode(format!(
                "serde error: {e}; expected `choices[0].message.content`"
            ))
        })?;

        let tokens_used = out.usage.and_then(|u| u.total_tokens).unwrap_or(0);
        let answer = out
            .choices
            .into_iter()
            .find_map(|c| c.message.content)
            .ok_or(AiLlmError::EmptyChoices)?;

        info!(
            latency_ms = started.elapsed().as_millis(),
            tokens_used,
            answer_len = answer.len(),
            "chat completion completed"
        );

        Ok(LlmAnswer {
            answer,
            used_prompt: used_prompt.to_string(),
            model: self.cfg.model.clone(),
            tokens_used,
        })
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Request body for `/chat/completions` (non-streaming).
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

impl<'a> ChatCompletionRequest<'a> {
    /// System message first (only when non-empty), then the user question.
    fn from_cfg(cfg: &'a LlmModelConfig, question: &'a str, system: &'a str) -> Self {
        let mut messages = Vec::with_capacity(2);
        if !system.is_empty() {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: question,
        });

        Self {
            model: &cfg.model,
            messages,
            max_tokens: cfg.max_tokens,
            temperature: cfg.temperature,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageOut,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_tokens: Option<u64>,
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::transport::{HttpMethod, TransportError, TransportResponse};

    /// Records requests and replays one canned reply.
    struct FakeTransport {
        reply: Mutex<Option<Result<TransportResponse, TransportError>>>,
        seen: Mutex<Vec<TransportRequest>>,
    }

    impl FakeTransport {
        fn replying(reply: Result<TransportResponse, TransportError>) -> Self {
            Self {
                reply: Mutex::new(Some(reply)),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn last_body(&self) -> serde_json::Value {
            let seen = self.seen.lock().unwrap();
            seen.last().and_then(|r| r.body.clone()).unwrap()
        }
    }

    impl HttpTransport for FakeTransport {
        async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
            self.seen.lock().unwrap().push(request);
            self.reply.lock().unwrap().take().expect("single reply")
        }
    }

    fn cfg() -> LlmModelConfig {
        LlmModelConfig {
            base_url: "http://llm.local/v1".into(),
            api_key: Some("sk-test".into()),
            model: "test-model".into(),
            max_tokens: 256,
            temperature: 0.5,
            timeout_secs: 60,
        }
    }

    fn ok_body(content: &str, total: Option<u64>) -> String {
        let mut v = json!({
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
        });
        if let Some(t) = total {
            v["usage"] = json!({ "prompt_tokens": 1, "completion_tokens": 2, "total_tokens": t });
        }
        v.to_string()
    }

    #[tokio::test]
    async fn explicit_system_prompt_is_prepended() {
        let fake = FakeTransport::replying(Ok(TransportResponse::new(200, ok_body("Looks good.", Some(42)))));
        let svc = ChatCompletionService::new(cfg(), fake, "default prompt");

        let ans = svc.ask("Review this", Some("You review code.")).await.unwrap();
        assert_eq!(
            ans,
            LlmAnswer {
                answer: "Looks good.".into(),
                used_prompt: "You review code.".into(),
                model: "test-model".into(),
                tokens_used: 42,
            }
        );

        let body = svc.transport.last_body();
        assert_eq!(body["model"], "test-model");
        assert_eq!(body["max_tokens"], 256);
        assert_eq!(body["messages"][0], json!({ "role": "system", "content": "You review code." }));
        assert_eq!(body["messages"][1], json!({ "role": "user", "content": "Review this" }));

        let seen = svc.transport.seen.lock().unwrap();
        assert_eq!(seen[0].method, HttpMethod::Post);
        assert_eq!(seen[0].url, "http://llm.local/v1/chat/completions");
        assert_eq!(seen[0].header_value("authorization"), Some("Bearer sk-test"));
        assert_eq!(seen[0].timeout, std::time::Duration::from_secs(60));
    }

    #[tokio::test]
    async fn falls_back_to_default_prompt() {
        let fake = FakeTransport::replying(Ok(TransportResponse::new(200, ok_body("ok", None))));
        let svc = ChatCompletionService::new(cfg(), fake, "default prompt");

        let ans = svc.ask("q", Some("")).await.unwrap();
        assert_eq!(ans.used_prompt, "default prompt");
        assert_eq!(ans.tokens_used, 0);
        assert_eq!(svc.transport.last_body()["messages"][0]["role"], "system");
    }

    #[tokio::test]
    async fn no_system_message_when_no_prompt_at_all() {
        let fake = FakeTransport::replying(Ok(TransportResponse::new(200, ok_body("ok", Some(3)))));
        let svc = ChatCompletionService::new(LlmModelConfig { api_key: None, ..cfg() }, fake, "");

        let ans = svc.ask("only user", None).await.unwrap();
        assert_eq!(ans.used_prompt, "");

        let body = svc.transport.last_body();
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");
        assert!(svc.transport.seen.lock().unwrap()[0].header_value("authorization").is_none());
    }

    #[tokio::test]
    async fn non_success_status_is_upstream_error() {
        let fake = FakeTransport::replying(Ok(TransportResponse::new(503, "overloaded")));
        let svc = ChatCompletionService::new(cfg(), fake, "");

        match svc.ask("q", None).await {
            Err(AiLlmError::Upstream(e)) => {
                assert_eq!(e.status, 503);
                assert_eq!(e.snippet, "overloaded");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn timeout_is_transport_error() {
        let fake = FakeTransport::replying(Err(TransportError::Timeout(std::time::Duration::from_secs(60))));
        let svc = ChatCompletionService::new(cfg(), fake, "");

        let err = svc.ask("q", None).await.unwrap_err();
        assert!(matches!(err, AiLlmError::Transport(TransportError::Timeout(_))));
        assert!(err.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn malformed_payload_is_decode_error() {
        let fake = FakeTransport::replying(Ok(TransportResponse::new(200, "<html>")));
        let svc = ChatCompletionService::new(cfg(), fake, "");

        assert!(matches!(svc.ask("q", None).await, Err(AiLlmError::Decode(_))));
    }

    #[tokio::test]
    async fn empty_choices_is_an_error() {
        let fake = FakeTransport::replying(Ok(TransportResponse::new(200, r#"{"choices":[]}"#)));
        let svc = ChatCompletionService::new(cfg(), fake, "");

        assert!(matches!(svc.ask("q", None).await, Err(AiLlmError::EmptyChoices)));
    }
}
