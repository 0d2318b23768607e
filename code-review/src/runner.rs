//! Sequential batch: collect, classify, extract, prompt, ask, record.

use ai_llm_service::transport::HttpTransport;
use tracing::{info, warn};

use crate::{
    classifier::{SelectionPolicy, select_reviewable},
    collector::ChangeSource,
    extractor::ContentExtractor,
    gateway::ReviewApiClient,
    prompt::ReviewRequest,
    report::{ReviewOutcome, ReviewReport, format_report},
};

/// Outcome text for a selected path that is absent from the work tree.
pub const FILE_NOT_FOUND: &str = "File not found in workspace";

/// How a batch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// The last commit touched no paths.
    NoChanges,
    /// Paths changed, none selected for review.
    NoCodeFiles,
    /// At least one code file was processed; `summary` is the rendered report.
    Reviewed { report: ReviewReport, summary: String },
}

impl BatchOutcome {
    pub fn has_review(&self) -> bool {
        matches!(self, BatchOutcome::Reviewed { .. })
    }
}

/// Runs one batch. Per-file failures are recorded in the report and never
/// abort the remaining files.
pub async fn run_batch<S, T>(
    source: &S,
    extractor: &ContentExtractor,
    gateway: &ReviewApiClient<T>,
    policy: SelectionPolicy,
) -> BatchOutcome
where
    S: ChangeSource,
    T: HttpTransport,
{
    let changed = source.changed_paths();
    if changed.is_empty() {
        info!("no changed files detected");
        return BatchOutcome::NoChanges;
    }
    info!(count = changed.len(), "changed files detected");

    let selected = select_reviewable(&changed, policy);
    if selected.is_empty() {
        info!("no code files among the changes");
        return BatchOutcome::NoCodeFiles;
    }
    info!(
        selected = selected.len(),
        skipped = changed.len() - selected.len(),
        "code files selected for review"
    );

    let mut report = ReviewReport::new();
    for path in &selected {
        if let Some(outcome) = review_one(path, source, extractor, gateway).await {
            report.record(path.as_str(), outcome);
        }
    }

    let summary = format_report(&report);
    info!(
        reviewed = report.reviewed_count(),
        total = report.len(),
        "batch finished"
    );
    BatchOutcome::Reviewed { report, summary }
}

/// `None` means the file had nothing to review and gets no report entry.
async fn review_one<S, T>(
    path: &str,
    source: &S,
    extractor: &ContentExtractor,
    gateway: &ReviewApiClient<T>,
) -> Option<ReviewOutcome>
where
    S: ChangeSource,
    T: HttpTransport,
{
    if !extractor.exists(path).await {
        warn!(path, "changed file missing from work tree");
        return Some(ReviewOutcome::Failed(FILE_NOT_FOUND.to_string()));
    }

    let file = extractor.extract(path, source).await;
    let Some(request) = ReviewRequest::new(path, file.content, file.diff) else {
        info!(path, "empty content and diff, skipping");
        return None;
    };

    info!(path, language = %request.language, "reviewing");
    Some(match gateway.ask(&request.to_prompt()).await {
        Ok(answer) => ReviewOutcome::Reviewed(answer),
        Err(err) => {
            warn!(path, error = %err, "review failed");
            ReviewOutcome::Failed(err.to_string())
        }
    })
}
