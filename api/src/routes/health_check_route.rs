//! GET /api/health: prompt presence plus LLM endpoint reachability.

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::info;

use crate::core::app_state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    pub fn from_checks(prompt_ok: bool, llm_ok: bool) -> Self {
        match (prompt_ok, llm_ok) {
            (true, true) => HealthStatus::Healthy,
            (false, false) => HealthStatus::Unhealthy,
            _ => HealthStatus::Degraded,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub prompt_loaded: bool,
    pub prompt_length: usize,
    pub ollama_connected: bool,
    pub model: String,
    pub server_time: String,
}

/// Handler: GET /api/health
///
/// Always 200; probe failures only lower the status.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let prompt = &state.prompts.code_review;
    let probe = state.health.probe(state.llm()).await;
    let status = HealthStatus::from_checks(prompt.is_loaded(), probe.connected);

    info!(?status, llm_latency_ms = probe.latency_ms, "health check");

    Json(HealthResponse {
        status,
        prompt_loaded: prompt.is_loaded(),
        prompt_length: prompt.char_len(),
        ollama_connected: probe.connected,
        model: state.llm().model.clone(),
        server_time: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_combines_both_checks() {
        assert_eq!(HealthStatus::from_checks(true, true), HealthStatus::Healthy);
        assert_eq!(HealthStatus::from_checks(true, false), HealthStatus::Degraded);
        assert_eq!(HealthStatus::from_checks(false, true), HealthStatus::Degraded);
        assert_eq!(HealthStatus::from_checks(false, false), HealthStatus::Unhealthy);
    }
}
