use std::sync::LazyLock;

use regex::Regex;

use super::fields::or_placeholder;

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^# (.+)$").unwrap());
static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*Duration\*\*:\s*(.+)").unwrap());
static FORMAT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*Format\*\*:\s*(.+)").unwrap());
static TARGET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*Target Level\*\*:\s*(.+)").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub duration: String,
    pub format: String,
    pub target_level: String,
}

/// Document-level header fields. `fallback_title` is used when there is no `# ` line.
pub fn extract(content: &str, fallback_title: &str) -> Metadata {
    Metadata {
        title: first_capture(&TITLE_RE, content)
            .unwrap_or(fallback_title)
            .to_string(),
        duration: or_placeholder(first_capture(&DURATION_RE, content)),
        format: or_placeholder(first_capture(&FORMAT_RE, content)),
        target_level: or_placeholder(first_capture(&TARGET_RE, content)),
    }
}

fn first_capture<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str())
}
