//! Per-file outcomes merged into one human-readable summary.

use serde::Serialize;

/// Tag that marks a failed file section in the rendered report.
pub const ERROR_TAG: &str = "Error:";

/// Message when there was nothing to review.
pub const NOTHING_TO_REVIEW: &str = "✅ No code files changed or all changes are in non-code files.";

const HEADER: &str = "### 📊 Code Review Summary\n\n";
const DISCLAIMER: &str =
    "💡 *This review is generated by AI. Please verify critical changes manually.*";

/// Result of reviewing one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum ReviewOutcome {
    Reviewed(String),
    Failed(String),
}

impl ReviewOutcome {
    /// Rendered body text; failures carry the [`ERROR_TAG`] prefix.
    pub fn text(&self) -> String {
        match self {
            ReviewOutcome::Reviewed(text) => text.clone(),
            ReviewOutcome::Failed(text) => format!("{ERROR_TAG} {text}"),
        }
    }

    /// A review whose text itself starts with [`ERROR_TAG`] counts as failed too.
    pub fn is_failure(&self) -> bool {
        match self {
            ReviewOutcome::Failed(_) => true,
            ReviewOutcome::Reviewed(text) => text.starts_with(ERROR_TAG),
        }
    }
}

/// One report entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReview {
    pub path: String,
    pub outcome: ReviewOutcome,
}

/// Ordered path → outcome mapping; one entry per path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReviewReport {
    entries: Vec<FileReview>,
}

impl ReviewReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome for `path`. A second record for the same path
    /// replaces the first in place, keeping its position.
    pub fn record(&mut self, path: impl Into<String>, outcome: ReviewOutcome) {
        let path = path.into();
        match self.entries.iter_mut().find(|e| e.path == path) {
            Some(entry) => entry.outcome = outcome,
            None => self.entries.push(FileReview { path, outcome }),
        }
    }

    pub fn entries(&self) -> &[FileReview] {
        &self.entries
    }

    pub fn get(&self, path: &str) -> Option<&ReviewOutcome> {
        self.entries
            .iter()
            .find(|e| e.path == path)
            .map(|e| &e.outcome)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Files whose review succeeded.
    pub fn reviewed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| !e.outcome.is_failure())
            .count()
    }
}

/// Renders the report as Markdown.
pub fn format_report(report: &ReviewReport) -> String {
    if report.is_empty() {
        return NOTHING_TO_REVIEW.to_string();
    }

    let mut out = String::from(HEADER);
    for entry in report.entries() {
        out.push_str(&format!("#### 📄 {}\n", entry.path));
        if entry.outcome.is_failure() {
            out.push_str(&format!("❌ {}\n\n", entry.outcome.text()));
        } else {
            out.push_str(&format!("{}\n\n", entry.outcome.text()));
        }
    }

    out.push_str("---\n");
    out.push_str(&format!(
        "**📈 Summary**: Reviewed {}/{} files\n\n",
        report.reviewed_count(),
        report.len()
    ));
    out.push_str(DISCLAIMER);
    out
}
