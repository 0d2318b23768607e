//! File content for the review prompt.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::collector::ChangeSource;

/// Content and diff of one changed file, prior to truncation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFile {
    pub content: String,
    pub diff: String,
}

impl ExtractedFile {
    /// Nothing to send: the caller skips such files.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() && self.diff.is_empty()
    }
}

/// Reads files relative to the checked-out work tree.
#[derive(Debug, Clone)]
pub struct ContentExtractor {
    workdir: PathBuf,
}

impl ContentExtractor {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        self.workdir.join(path)
    }

    /// Whether `path` exists in the work tree.
    pub async fn exists(&self, path: &str) -> bool {
        tokio::fs::try_exists(self.resolve(path))
            .await
            .unwrap_or(false)
    }

    /// Full UTF-8 text of `path`; empty with a warning on any read failure.
    pub async fn read_full_text(&self, path: &str) -> String {
        read_text(&self.resolve(path)).await
    }

    /// Content plus the diff from `changes`.
    pub async fn extract<S: ChangeSource>(&self, path: &str, changes: &S) -> ExtractedFile {
        ExtractedFile {
            content: self.read_full_text(path).await,
            diff: changes.file_diff(path),
        }
    }
}

async fn read_text(path: &Path) -> String {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "error reading file");
            String::new()
        }
    }
}
