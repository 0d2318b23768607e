//! Reachability probe for the LLM endpoint.
//!
//! Probe: `GET {base_url with "/v1" → "/api/tags"}` with a short timeout.
//! The endpoint counts as connected only on HTTP 200.
//!
//! [`HealthService::probe`] is resilient and never fails: transport errors and
//! non-200 replies are mapped to `connected = false`, which is what `/health`
//! style endpoints need.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::llm_model_config::LlmModelConfig;
use crate::error_handler::make_snippet;
use crate::transport::{HttpTransport, TransportRequest};

/// Default probe timeout in seconds.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;

/// A serializable snapshot of one probe.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointHealth {
    /// URL that was probed.
    pub url: String,
    /// `true` iff the probe got HTTP 200.
    pub connected: bool,
    /// Measured latency in milliseconds.
    pub latency_ms: u128,
    /// Short human-readable message with details.
    pub message: String,
}

/// Health checker that reuses a single transport.
pub struct HealthService<T> {
    transport: T,
    timeout: Duration,
}

impl<T: HttpTransport> HealthService<T> {
    /// Creates a new health service with an optional probe timeout (seconds).
    pub fn new(transport: T, timeout_secs: Option<u64>) -> Self {
        let timeout = Duration::from_secs(timeout_secs.unwrap_or(DEFAULT_PROBE_TIMEOUT_SECS));
        info!(timeout_secs = timeout.as_secs(), "HealthService initialized");
        Self { transport, timeout }
    }

    /// Probes the tags-listing URL derived from `cfg`.
    pub async fn probe(&self, cfg: &LlmModelConfig) -> EndpointHealth {
        let url = cfg.tags_url();
        let start = Instant::now();
        debug!(%url, "health probe");

        let result = self
            .transport
            .send(TransportRequest::get(&url, self.timeout))
            .await;
        let latency_ms = start.elapsed().as_millis();

        match result {
            Ok(resp) if resp.status == 200 => {
                info!(%url, latency_ms, "health probe completed");
                EndpointHealth {
                    url,
                    connected: true,
                    latency_ms,
                    message: "endpoint is reachable".into(),
                }
            }
            Ok(resp) => {
                let snippet = make_snippet(&resp.body);
                warn!(%url, status = resp.status, %snippet, latency_ms, "health probe returned non-200 status");
                EndpointHealth {
                    url,
                    connected: false,
                    latency_ms,
                    message: format!("HTTP {}", resp.status),
                }
            }
            Err(err) => {
                warn!(%url, error = %err, latency_ms, "health probe failed");
                EndpointHealth {
                    url,
                    connected: false,
                    latency_ms,
                    message: err.to_string(),
                }
            }
        }
    }
}
