//! Review prompt template.

use crate::classifier::file_extension;

/// Hard cutoff (in characters) for both the content and the diff sections.
pub const MAX_SECTION_CHARS: usize = 5000;

/// Everything the template needs for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    pub path: String,
    pub content: String,
    pub diff: String,
    /// Extension without the dot, lowercase (`"rs"`); empty if none.
    pub language: String,
}

impl ReviewRequest {
    /// `None` when there is nothing to review (no content and no diff).
    pub fn new(path: impl Into<String>, content: String, diff: String) -> Option<Self> {
        if content.is_empty() && diff.is_empty() {
            return None;
        }
        let path = path.into();
        let language = detect_language(&path);
        Some(Self {
            path,
            content,
            diff,
            language,
        })
    }

    pub fn to_prompt(&self) -> String {
        render(&self.language, &self.path, &self.content, &self.diff)
    }
}

/// Language tag from the extension with the leading dot stripped.
pub fn detect_language(path: &str) -> String {
    file_extension(path)
        .map(|ext| ext.trim_start_matches('.').to_string())
        .unwrap_or_default()
}

/// Builds the prompt for `path` (see [`ReviewRequest::to_prompt`]).
pub fn build_prompt(path: &str, content: &str, diff: &str) -> String {
    render(&detect_language(path), path, content, diff)
}

/// First `max` characters of `text`; no attempt to keep syntax valid.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn render(language: &str, path: &str, content: &str, diff: &str) -> String {
    let content = truncate_chars(content, MAX_SECTION_CHARS);
    let diff = truncate_chars(diff, MAX_SECTION_CHARS);
    let language = language.to_uppercase();

    format!(
        "Please review the following {language} code changes:

FILE: {path}

CODE CONTENT:
```
{content}
```

CHANGES (diff):
```
{diff}
```

Please provide a code review focusing on:
1. Code quality and readability
2. Potential bugs or issues
3. Performance considerations
4. Security concerns
5. Best practices violations
6. Suggestions for improvement

Keep the review concise and actionable.
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_language_path_content_and_diff() {
        let p = build_prompt("src/App.tsx", "const a = 1;", "+const a = 1;");
        assert!(p.starts_with("Please review the following TSX code changes:"));
        assert!(p.contains("FILE: src/App.tsx"));
        assert!(p.contains("```\nconst a = 1;\n```"));
        assert!(p.contains("CHANGES (diff):\n```\n+const a = 1;\n```"));
        assert!(p.trim_end().ends_with("Keep the review concise and actionable."));
    }

    #[test]
    fn content_is_cut_at_5000_chars() {
        let head = "a".repeat(5000);
        let content = format!("{head}{}", "b".repeat(1000));
        let p = build_prompt("x.py", &content, "");

        assert!(p.contains(&format!("```\n{head}\n```")));
        assert!(!p.contains("bb"));
    }

    #[test]
    fn diff_is_cut_independently() {
        let diff = "d".repeat(6000);
        let p = build_prompt("x.rs", "fn x() {}", &diff);
        assert!(p.contains(&format!("```\n{}\n```", "d".repeat(5000))));
        assert!(!p.contains(&"d".repeat(5001)));
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        let s = "ж".repeat(10);
        assert_eq!(truncate_chars(&s, 4), "жжжж");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    #[test]
    fn extensionless_file_has_empty_language() {
        assert_eq!(detect_language("Dockerfile"), "");
        assert_eq!(detect_language("lib/a.RS"), "rs");
    }

    #[test]
    fn empty_payload_builds_no_request() {
        assert!(ReviewRequest::new("a.py", String::new(), String::new()).is_none());
        let req = ReviewRequest::new("a.py", "x".into(), String::new()).unwrap();
        assert_eq!(req.language, "py");
        assert_eq!(req.to_prompt(), build_prompt("a.py", "x", ""));
    }
}
