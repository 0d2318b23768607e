//! HTTP seam for every outbound call made by the gateways.
//!
//! Gateways build a [`TransportRequest`] and hand it to an [`HttpTransport`];
//! they only ever see a status code plus the raw body, or a [`TransportError`]
//! when no response arrived. Production code uses [`ReqwestTransport`]; tests
//! plug in an in-memory fake and exercise the gateway contract offline.
//!
//! The trait uses a plain `impl Future` return (no `async-trait`, no boxed
//! futures), so consumers are generic over the transport.

use std::{future::Future, time::Duration};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// HTTP verbs the gateways need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A single outbound request: verb, URL, headers, optional JSON body, timeout.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub timeout: Duration,
}

impl TransportRequest {
    /// `GET url` without a body.
    pub fn get(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            timeout,
        }
    }

    /// `POST url` with a JSON body (`Content-Type: application/json` is set).
    pub fn post_json(url: impl Into<String>, body: serde_json::Value, timeout: Duration) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: vec![("Content-Type".into(), "application/json".into())],
            body: Some(body),
            timeout,
        }
    }

    /// Adds a header (builder style).
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Looks up a header value by case-insensitive name.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// `true` for 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// The request produced no HTTP response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("network error: {0}")]
    Network(String),

    /// The request could not be built (bad header value, bad URL).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Request in, response or transport failure out.
pub trait HttpTransport: Send + Sync {
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send;
}

/// [`HttpTransport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a transport with a fresh connection pool.
    ///
    /// # Errors
    /// Returns [`TransportError::Network`] if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wraps an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let TransportRequest {
            method,
            url,
            headers,
            body,
            timeout,
        } = request;

        debug!(?method, %url, timeout_secs = timeout.as_secs(), "sending request");

        let mut builder = match method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        }
        .timeout(timeout);

        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, timeout))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| map_reqwest_error(e, timeout))?;

        Ok(TransportResponse { status, body })
    }
}

fn map_reqwest_error(err: reqwest::Error, timeout: Duration) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(timeout)
    } else if err.is_builder() {
        TransportError::InvalidRequest(err.to_string())
    } else {
        TransportError::Network(err.to_string())
    }
}
