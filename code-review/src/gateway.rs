//! Review-API gateway used by the batch flow.
//!
//! `POST {api_url}` with `{"question": <prompt>}`; the service replies with
//! `{"success": bool, "answer"?: string, "error"?: string}`. Every failure is
//! returned as a [`ReviewApiError`] whose `Display` is the text recorded in
//! the report; nothing escapes as a panic and nothing is retried.

use std::time::{Duration, Instant};

use ai_llm_service::transport::{HttpTransport, TransportError, TransportRequest};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Placeholder when the service reports success without an answer.
pub const NO_REVIEW_GENERATED: &str = "No review generated";

/// `User-Agent` sent with every review request.
pub const USER_AGENT: &str = "GitHub-Actions-Code-Review";

/// Why a review request produced no answer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReviewApiError {
    /// HTTP 200 but `success` was not true.
    #[error("API Error: {0}")]
    Api(String),

    /// Any status other than 200.
    #[error("HTTP Error {status}: {body}")]
    Http { status: u16, body: String },

    /// No response (timeout, DNS, connection refused).
    #[error("Request Error: {0}")]
    Request(String),

    /// Response could not be interpreted.
    #[error("Unexpected Error: {0}")]
    Unexpected(String),
}

impl From<TransportError> for ReviewApiError {
    fn from(err: TransportError) -> Self {
        ReviewApiError::Request(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ReviewApiReply {
    #[serde(default)]
    success: bool,
    answer: Option<String>,
    error: Option<String>,
}

/// Client for the review endpoint.
#[derive(Debug)]
pub struct ReviewApiClient<T> {
    transport: T,
    api_url: String,
    timeout: Duration,
}

impl<T: HttpTransport> ReviewApiClient<T> {
    pub fn new(transport: T, api_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            transport,
            api_url: api_url.into(),
            timeout,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Asks for a review of `question` and returns the answer text.
    pub async fn ask(&self, question: &str) -> Result<String, ReviewApiError> {
        let started = Instant::now();
        info!(url = %self.api_url, "calling review API");

        let request = TransportRequest::post_json(
            &self.api_url,
            json!({ "question": question }),
            self.timeout,
        )
        .header("User-Agent", USER_AGENT);

        let resp = self.transport.send(request).await.map_err(|err| {
            warn!(error = %err, latency_ms = started.elapsed().as_millis(), "review API unreachable");
            ReviewApiError::from(err)
        })?;

        if resp.status != 200 {
            warn!(status = resp.status, latency_ms = started.elapsed().as_millis(), "review API returned error status");
            return Err(ReviewApiError::Http {
                status: resp.status,
                body: resp.body,
            });
        }

        let reply: ReviewApiReply = resp
            .json()
            .map_err(|e| ReviewApiError::Unexpected(e.to_string()))?;

        debug!(
            success = reply.success,
            latency_ms = started.elapsed().as_millis(),
            "review API replied"
        );

        if reply.success {
            Ok(reply.answer.unwrap_or_else(|| NO_REVIEW_GENERATED.to_string()))
        } else {
            Err(ReviewApiError::Api(
                reply.error.unwrap_or_else(|| "Unknown error".to_string()),
            ))
        }
    }
}
