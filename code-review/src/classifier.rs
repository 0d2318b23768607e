//! Path classification: is a changed path reviewable code, and is it noise?
//!
//! Both predicates are pure functions of the path string. Matching is
//! case-insensitive (the path is lowercased first).
//!
//! - [`is_code_file`]: extension allow-list; otherwise the whole path must be
//!   a known build file or a dotfile that is not known non-code config, so
//!   `Dockerfile` counts and `docker/Dockerfile` does not.
//! - [`should_ignore`]: dependency/build/cache/VCS directory prefixes, lock
//!   files, minified bundles, binaries, logs, temp files, OS metadata, media.
//!
//! The batch selects on `is_code` alone unless the ignore list is explicitly
//! enabled (see [`SelectionPolicy`]).

use tracing::debug;

/// Source and markup extensions worth sending for review.
const CODE_EXTENSIONS: &[&str] = &[
    ".py", ".js", ".ts", ".jsx", ".tsx", ".java", ".cpp", ".c", ".h", ".hpp", ".go", ".rs", ".rb",
    ".php", ".swift", ".kt", ".scala", ".cs", ".html", ".css", ".scss", ".sass", ".less", ".vue",
    ".svelte",
];

/// Build files without a (code) extension, matched by file name.
const BUILD_FILE_NAMES: &[&str] = &["dockerfile", "makefile", "docker-compose.yml"];

/// Dotfiles that are configuration, not code.
const EXEMPT_DOTFILES: &[&str] = &[".gitignore", ".env", ".env.example"];

/// Directory prefixes whose contents are never worth reviewing.
const IGNORED_DIR_PREFIXES: &[&str] = &[
    "node_modules/",
    "vendor/",
    "dist/",
    "build/",
    "out/",
    "target/",
    "__pycache__/",
    ".git/",
    ".github/",
    ".next/",
    ".nuxt/",
    ".output/",
    "coverage/",
    ".nyc_output/",
    ".pytest_cache/",
    ".mypy_cache/",
    ".ruff_cache/",
    ".venv/",
    "venv/",
    "env/",
    ".env",
    ".env.",
];

/// File patterns: `dir/` → prefix, `.suffix` → suffix, anything else → exact path.
const IGNORED_FILE_PATTERNS: &[&str] = &[
    // lock files
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "poetry.lock",
    "pipfile.lock",
    "composer.lock",
    "gemfile.lock",
    // minified bundles
    ".min.js",
    ".min.css",
    // compiled / binary
    ".pyc",
    ".pyo",
    ".pyd",
    ".so",
    ".dll",
    ".exe",
    ".dylib",
    ".class",
    ".jar",
    ".war",
    ".ear",
    // logs
    ".log",
    // temp / swap
    ".tmp",
    ".temp",
    ".bak",
    ".swp",
    ".swo",
    // IDE
    ".idea/",
    ".vscode/",
    ".vs/",
    // OS metadata
    ".ds_store",
    "thumbs.db",
    // images / video / audio
    ".jpg",
    ".jpeg",
    ".png",
    ".gif",
    ".bmp",
    ".svg",
    ".mp4",
    ".avi",
    ".mov",
    ".mkv",
    ".mp3",
    ".wav",
    ".ogg",
    // fonts
    ".ttf",
    ".otf",
    ".woff",
    ".woff2",
    // archives
    ".zip",
    ".tar",
    ".gz",
    ".7z",
    ".rar",
    // documents
    ".pdf",
    ".doc",
    ".docx",
    ".xls",
    ".xlsx",
    ".ppt",
    ".pptx",
];

/// Both predicates for one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationVerdict {
    pub is_code: bool,
    pub ignored: bool,
}

/// How verdicts turn into the include/exclude decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionPolicy {
    /// Also drop paths matched by [`should_ignore`]. Off by default: the
    /// reference selection uses `is_code` only.
    pub apply_ignore_list: bool,
}

impl ClassificationVerdict {
    pub fn is_selected(&self, policy: SelectionPolicy) -> bool {
        self.is_code && !(policy.apply_ignore_list && self.ignored)
    }
}

/// Classifies one path.
pub fn classify(path: &str) -> ClassificationVerdict {
    ClassificationVerdict {
        is_code: is_code_file(path),
        ignored: should_ignore(path),
    }
}

/// Keeps the selected paths, preserving input order.
pub fn select_reviewable(paths: &[String], policy: SelectionPolicy) -> Vec<String> {
    paths
        .iter()
        .filter(|p| {
            let verdict = classify(p);
            if verdict.is_code && verdict.ignored {
                debug!(path = %p, selected = verdict.is_selected(policy), "code file also matches ignore list");
            }
            verdict.is_selected(policy)
        })
        .cloned()
        .collect()
}

/// Last path component.
fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Lowercased extension including the dot, e.g. `".rs"`.
///
/// Only a dot that is neither the first nor the last character of the file
/// name starts an extension, so `.eslintrc` and `notes.` have none.
pub fn file_extension(path: &str) -> Option<String> {
    let name = file_name(path);
    match name.rfind('.') {
        Some(i) if i > 0 && i + 1 < name.len() => Some(name[i..].to_lowercase()),
        _ => None,
    }
}

/// `true` for reviewable source/markup files.
pub fn is_code_file(path: &str) -> bool {
    match file_extension(path) {
        Some(ext) => CODE_EXTENSIONS.contains(&ext.as_str()),
        None => {
            let lower = path.to_lowercase();
            if BUILD_FILE_NAMES.contains(&lower.as_str()) {
                true
            } else if lower.starts_with('.') {
                !EXEMPT_DOTFILES.contains(&lower.as_str())
            } else {
                false
            }
        }
    }
}

/// `true` for dependency/build output, lock files, binaries and other noise.
pub fn should_ignore(path: &str) -> bool {
    let lower = path.to_lowercase();

    if IGNORED_DIR_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        return true;
    }

    IGNORED_FILE_PATTERNS.iter().any(|pattern| {
        if let Some(dir) = pattern.strip_suffix('/') {
            lower.starts_with(dir)
        } else if pattern.starts_with('.') {
            lower.ends_with(pattern)
        } else {
            lower == *pattern
        }
    })
}
