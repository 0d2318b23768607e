//! Batch settings read from the environment.
//!
//! - `LLM_API_URL`              = review endpoint (default `http://127.0.0.1:8000/api/review/`)
//! - `REVIEW_TIMEOUT_SECS`      = per-request timeout (default `60`)
//! - `REVIEW_WORKDIR`           = checked-out repository root (default `.`)
//! - `GITHUB_OUTPUT`            = CI step-output file (stdout when unset)
//! - `REVIEW_APPLY_IGNORE_LIST` = also drop ignore-listed code files (default `false`)

use std::{path::PathBuf, time::Duration};

use ai_llm_service::error_handler::{
    Result, env_flag, env_opt, env_or, env_parse_or, validate_http_endpoint,
};

use crate::classifier::SelectionPolicy;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api/review/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewJobConfig {
    pub api_url: String,
    pub timeout: Duration,
    pub workdir: PathBuf,
    pub github_output: Option<PathBuf>,
    pub selection: SelectionPolicy,
}

impl ReviewJobConfig {
    /// # Errors
    /// Fails on an unparsable timeout or a URL without http(s) scheme.
    pub fn from_env() -> Result<Self> {
        let api_url = env_or("LLM_API_URL", DEFAULT_API_URL);
        validate_http_endpoint("LLM_API_URL", &api_url)?;
        let timeout_secs = env_parse_or("REVIEW_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS, "expected u64")?;

        Ok(Self {
            api_url,
            timeout: Duration::from_secs(timeout_secs),
            workdir: PathBuf::from(env_or("REVIEW_WORKDIR", ".")),
            github_output: env_opt("GITHUB_OUTPUT").map(PathBuf::from),
            selection: SelectionPolicy {
                apply_ignore_list: env_flag("REVIEW_APPLY_IGNORE_LIST", false),
            },
        })
    }
}

impl Default for ReviewJobConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            workdir: PathBuf::from("."),
            github_output: None,
            selection: SelectionPolicy::default(),
        }
    }
}
