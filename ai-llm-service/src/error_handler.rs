//! Errors and env helpers shared by every crate in the workspace.
//!
//! [`AiLlmError`] covers gateway calls and startup configuration; the env
//! helpers fall back to defaults for absent or blank values and fail only on
//! values that are present but malformed. Messages carry an `[AI LLM Service]`
//! prefix so they are easy to attribute in logs.

use std::str::FromStr;

use thiserror::Error;

use crate::transport::TransportError;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, AiLlmError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `ai-llm-service` crate.
///
/// Every failure of a gateway call lands in one of these variants; nothing is
/// retried.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AiLlmError {
    /// Configuration/validation errors (startup only).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The request never produced an HTTP response (timeout, DNS, refused).
    #[error("[AI LLM Service] transport error: {0}")]
    Transport(#[from] TransportError),

    /// Upstream answered with a non-success status.
    #[error("[AI LLM Service] {0}")]
    Upstream(HttpError),

    /// Response payload could not be decoded as expected.
    #[error("[AI LLM Service] decode error: {0}")]
    Decode(String),

    /// The completion response carried no choice with content.
    #[error("[AI LLM Service] completion response contained no choices")]
    EmptyChoices,
}

/// Non-success HTTP reply from the upstream endpoint.
#[derive(Debug, Error)]
#[error("HTTP {status} from {url}: {snippet}")]
pub struct HttpError {
    /// Numeric HTTP status code.
    pub status: u16,
    /// Request URL.
    pub url: String,
    /// Short snippet of the response body (trimmed).
    pub snippet: String,
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
///
/// Absent variables never produce an error (they fall back to defaults); only
/// values that are present but malformed do.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A number failed to parse (like ports, limits, timeouts).
    #[error("[AI LLM Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `AI_MAX_TOKENS`, `PORT`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u32`).
        reason: &'static str,
    },

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[AI LLM Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `OLLAMA_BASE_URL`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },

    /// A numeric field was outside of the allowed range.
    #[error("[AI LLM Service] {field} is out of range: {detail}")]
    OutOfRange {
        /// Field name (e.g., `temperature`).
        field: &'static str,
        /// Description of the expected range.
        detail: &'static str,
    },

    /// Model name was empty.
    #[error("[AI LLM Service] model name must not be empty")]
    EmptyModel,
}

/* ------------------------------------------------------------------------- */
/* Env helpers (return unified `Result<T>`)                                  */
/* ------------------------------------------------------------------------- */

/// Returns the trimmed value of `name`, or `None` if unset or blank.
pub fn env_opt(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Returns the value of `name`, or `default` if unset or blank.
pub fn env_or(name: &str, default: &str) -> String {
    env_opt(name).unwrap_or_else(|| default.to_string())
}

/// Parses `name` as `T`, falling back to `default` if unset or blank.
///
/// # Errors
/// Returns [`AiLlmError::Config`] with [`ConfigError::InvalidNumber`] if the
/// variable is set but does not parse.
pub fn env_parse_or<T: FromStr>(name: &'static str, default: T, reason: &'static str) -> Result<T> {
    match env_opt(name) {
        Some(v) => v
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { var: name, reason }.into()),
        None => Ok(default),
    }
}

/// Reads a boolean flag: case-insensitive `"true"` is on, anything else off.
pub fn env_flag(name: &str, default: bool) -> bool {
    env_opt(name)
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}

/* ------------------------------------------------------------------------- */
/* Validation helpers (return unified `Result<T>`)                           */
/* ------------------------------------------------------------------------- */

/// Requires an `http://` or `https://` scheme.
///
/// # Errors
/// [`ConfigError::InvalidFormat`] otherwise.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

/// Requires a finite `value` in `min..=max`.
///
/// # Errors
/// [`ConfigError::OutOfRange`] otherwise.
pub fn validate_range_f32(field: &'static str, value: f32, min: f32, max: f32) -> Result<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            detail: "expected value in inclusive range",
        }
        .into())
    }
}

/// Cuts a response body down to a log-friendly snippet.
pub fn make_snippet(text: &str) -> String {
    const MAX: usize = 300;
    let trimmed = text.trim();
    match trimmed.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}…", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_keeps_short_bodies() {
        assert_eq!(make_snippet("  oops \n"), "oops");
    }

    #[test]
    fn snippet_cuts_long_bodies_on_char_boundary() {
        let body = "é".repeat(400);
        let s = make_snippet(&body);
        assert_eq!(s.chars().count(), 301);
        assert!(s.ends_with('…'));
    }

    #[test]
    fn endpoint_scheme_is_checked() {
        assert!(validate_http_endpoint("X", "http://localhost:11434/v1").is_ok());
        assert!(validate_http_endpoint("X", "localhost:11434").is_err());
    }

    #[test]
    fn temperature_range() {
        assert!(validate_range_f32("temperature", 0.7, 0.0, 2.0).is_ok());
        assert!(validate_range_f32("temperature", f32::NAN, 0.0, 2.0).is_err());
        assert!(validate_range_f32("temperature", 3.5, 0.0, 2.0).is_err());
    }
}
