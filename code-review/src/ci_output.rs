//! CI step outputs (`key=value` lines appended to `$GITHUB_OUTPUT`).
//!
//! - `has_review`: `true` only when a report was produced
//! - `review_content`: the report as one JSON-encoded string

use std::{
    fs::OpenOptions,
    io::{self, Write},
    path::PathBuf,
};

use thiserror::Error;
use tracing::{info, warn};

use crate::runner::BatchOutcome;

/// `review_content` when files changed but none of them is code.
pub const NO_CODE_FILES_MESSAGE: &str = "✅ No code files changed.";

#[derive(Debug, Error)]
pub enum CiOutputError {
    #[error("failed to write CI output to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode review content: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Output lines for `outcome`, in write order.
pub fn output_lines(outcome: &BatchOutcome) -> Result<Vec<String>, CiOutputError> {
    Ok(match outcome {
        BatchOutcome::NoChanges => vec!["has_review=false".to_string()],
        BatchOutcome::NoCodeFiles => vec![
            "has_review=false".to_string(),
            format!("review_content={NO_CODE_FILES_MESSAGE}"),
        ],
        BatchOutcome::Reviewed { summary, .. } => vec![
            "has_review=true".to_string(),
            format!("review_content={}", serde_json::to_string(summary)?),
        ],
    })
}

/// Append-only output channel.
#[derive(Debug, Clone, Default)]
pub struct CiOutput {
    path: Option<PathBuf>,
}

impl CiOutput {
    /// `None` writes to stdout.
    pub fn new(path: Option<PathBuf>) -> Self {
        if path.is_none() {
            warn!("GITHUB_OUTPUT is not set; step outputs go to stdout");
        }
        Self { path }
    }

    /// Appends the lines for `outcome`.
    pub fn publish(&self, outcome: &BatchOutcome) -> Result<(), CiOutputError> {
        let mut text = output_lines(outcome)?.join("\n");
        text.push('\n');

        match &self.path {
            Some(path) => {
                let write = || -> io::Result<()> {
                    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                    file.write_all(text.as_bytes())
                };
                write().map_err(|source| CiOutputError::Write {
                    path: path.display().to_string(),
                    source,
                })?;
                info!(path = %path.display(), bytes = text.len(), "CI outputs written");
            }
            None => {
                let mut stdout = io::stdout().lock();
                stdout
                    .write_all(text.as_bytes())
                    .map_err(|source| CiOutputError::Write {
                        path: "<stdout>".into(),
                        source,
                    })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReviewReport;

    #[test]
    fn no_changes_emits_only_flag() {
        assert_eq!(
            output_lines(&BatchOutcome::NoChanges).unwrap(),
            vec!["has_review=false"]
        );
    }

    #[test]
    fn no_code_files_emits_flag_and_message() {
        assert_eq!(
            output_lines(&BatchOutcome::NoCodeFiles).unwrap(),
            vec!["has_review=false", "review_content=✅ No code files changed."]
        );
    }

    #[test]
    fn review_content_is_a_single_json_line() {
        let outcome = BatchOutcome::Reviewed {
            report: ReviewReport::new(),
            summary: "line one\nline \"two\"".into(),
        };
        let lines = output_lines(&outcome).unwrap();
        assert_eq!(lines[0], "has_review=true");
        assert_eq!(lines[1], r#"review_content="line one\nline \"two\"""#);
    }

    #[test]
    fn publish_appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("out.txt");
        std::fs::write(&file, "earlier=1\n").unwrap();

        let out = CiOutput::new(Some(file.clone()));
        out.publish(&BatchOutcome::NoChanges).unwrap();

        assert_eq!(
            std::fs::read_to_string(&file).unwrap(),
            "earlier=1\nhas_review=false\n"
        );
    }

    #[test]
    fn unwritable_target_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let out = CiOutput::new(Some(dir.path().join("missing/dir/out.txt")));
        assert!(matches!(
            out.publish(&BatchOutcome::NoChanges),
            Err(CiOutputError::Write { .. })
        ));
    }
}
