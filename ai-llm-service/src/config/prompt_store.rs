//! Prompt files read from disk once at startup.
//!
//! - `AI_SYSTEM_PROMPT_FILE`      = default system prompt for every question (default `prompt.txt`)
//! - `AI_CODE_REVIEW_PROMPT_FILE` = prompt used by the review endpoints (default `prompt.txt`)
//!
//! When both variables name the same file it is read a single time and the
//! content is shared. A missing or unreadable file yields an empty prompt and
//! a warning; it never fails startup.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{info, warn};

use crate::error_handler::env_or;

pub const DEFAULT_PROMPT_FILE: &str = "prompt.txt";

/// Prompt text together with the file it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptSource {
    pub path: PathBuf,
    pub content: String,
}

impl PromptSource {
    /// Reads `path` (see [`read_prompt_file`]).
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let content = read_prompt_file(&path);
        Self { path, content }
    }

    /// Non-blank content.
    pub fn is_loaded(&self) -> bool {
        !self.content.trim().is_empty()
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}

/// Reads and trims a prompt file; empty string on any failure.
pub fn read_prompt_file(path: &Path) -> String {
    if !path.exists() {
        warn!(path = %path.display(), "prompt file not found");
        return String::new();
    }
    match fs::read_to_string(path) {
        Ok(text) => text.trim().to_string(),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to read prompt file");
            String::new()
        }
    }
}

/// The two prompts the service works with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptStore {
    /// Default system prompt for the chat gateway.
    pub system: PromptSource,
    /// Prompt for the review endpoints.
    pub code_review: PromptSource,
}

impl PromptStore {
    /// Loads both prompt files named by the environment.
    pub fn from_env() -> Self {
        let system = env_or("AI_SYSTEM_PROMPT_FILE", DEFAULT_PROMPT_FILE);
        let review = env_or("AI_CODE_REVIEW_PROMPT_FILE", DEFAULT_PROMPT_FILE);
        Self::load(system, review)
    }

    /// Loads both files, reading a shared path only once.
    pub fn load(system_path: impl Into<PathBuf>, review_path: impl Into<PathBuf>) -> Self {
        let system = PromptSource::load(system_path);
        let review_path = review_path.into();
        let code_review = if review_path == system.path {
            PromptSource {
                path: review_path,
                content: system.content.clone(),
            }
        } else {
            PromptSource::load(review_path)
        };

        info!(
            system_file = %system.path.display(),
            system_len = system.char_len(),
            review_file = %code_review.path.display(),
            review_len = code_review.char_len(),
            "prompts loaded"
        );

        Self {
            system,
            code_review,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_content_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("prompt.txt");
        fs::write(&file, "\n  You review Rust code.  \n\n").unwrap();

        let src = PromptSource::load(&file);
        assert_eq!(src.content, "You review Rust code.");
        assert!(src.is_loaded());
        assert_eq!(src.char_len(), 21);
    }

    #[test]
    fn missing_file_yields_empty_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let src = PromptSource::load(dir.path().join("absent.txt"));
        assert_eq!(src.content, "");
        assert!(!src.is_loaded());
    }

    #[test]
    fn separate_files_are_loaded_independently() {
        let dir = tempfile::tempdir().unwrap();
        let sys = dir.path().join("system.txt");
        let rev = dir.path().join("review.txt");
        fs::write(&sys, "system").unwrap();
        fs::write(&rev, "review").unwrap();

        let store = PromptStore::load(&sys, &rev);
        assert_eq!(store.system.content, "system");
        assert_eq!(store.code_review.content, "review");
        assert_eq!(store.code_review.path, rev);
    }

    #[test]
    fn shared_path_gives_identical_prompts() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("prompt.txt");
        fs::write(&file, "shared").unwrap();

        let store = PromptStore::load(&file, &file);
        assert_eq!(store.system, store.code_review);
    }
}
