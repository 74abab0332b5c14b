use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::document::normalize_newlines;
use crate::error::ResolveError;
use crate::model::PLACEHOLDER;

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[.*?\]\(([^)]+)\)").unwrap());
static NUMBERED_ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+").unwrap());
static NUMBERED_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#+\s*\d+").unwrap());
static SECTION_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^##[^#]").unwrap());
static ANY_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#+\s+").unwrap());

const PARENT_PREFIX: &str = "../";
const TITLE_SCAN_LINES: usize = 10;
const SUMMARY_HEADINGS: usize = 5;

/// Resolves `**Reference**:` citations to the text they point at.
#[derive(Debug, Clone)]
pub struct ReferenceResolver {
    root: PathBuf,
}

/// Link target split into a root-relative path and an optional `#anchor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Target<'a> {
    path: &'a str,
    anchor: Option<&'a str>,
}

impl<'a> Target<'a> {
    /// Drops exactly one leading `../`; deeper or absent hops are left alone.
    fn parse(link: &'a str) -> Self {
        let link = link.strip_prefix(PARENT_PREFIX).unwrap_or(link);
        let mut pieces = link.split('#');
        let path = pieces.next().unwrap_or_default();
        Self {
            path,
            anchor: pieces.next(),
        }
    }
}

impl ReferenceResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Always returns a descriptive, non-empty string: the anchored section,
    /// a file summary, the citation itself, or a not-found / error message.
    pub fn resolve(&self, citation: &str) -> String {
        if citation.is_empty() || citation == PLACEHOLDER {
            return PLACEHOLDER.to_string();
        }
        match self.try_resolve(citation) {
            Ok(content) => content,
            Err(e) => {
                warn!("Reference {:?} failed: {}", citation, e);
                format!("Error fetching reference: {}", e)
            }
        }
    }

    fn try_resolve(&self, citation: &str) -> Result<String, ResolveError> {
        let Some(link) = LINK_RE.captures(citation).and_then(|c| c.get(1)) else {
            return Ok(citation.to_string());
        };
        let target = Target::parse(link.as_str());

        let full_path = self.root.join(target.path);
        if !full_path.exists() {
            debug!("Referenced file missing: {}", full_path.display());
            return Ok(format!("Referenced file not found: {}", target.path));
        }

        let content = fs::read_to_string(&full_path)
            .map(|raw| normalize_newlines(&raw))
            .map_err(|source| ResolveError::Read {
                path: full_path.display().to_string(),
                source,
            })?;

        if let Some(anchor) = target.anchor {
            if let Some(section) = extract_section_by_anchor(&content, anchor)? {
                return Ok(section);
            }
        }
        Ok(summarize(&content, target.path))
    }
}

/// Section under the heading numbered like the anchor (`1-what-is-go` → `# 1. ...`),
/// up to the next numbered heading or `## ` heading. Only digit-led anchors qualify.
fn extract_section_by_anchor(content: &str, anchor: &str) -> Result<Option<String>, ResolveError> {
    if !NUMBERED_ANCHOR_RE.is_match(anchor) {
        return Ok(None);
    }
    let number = anchor.split('-').next().unwrap_or_default();
    let heading_re = Regex::new(&format!(r"(?mi)^#+\s*{}[.:]?\s*(.+?)$", regex::escape(number)))?;
    let Some(heading) = heading_re.find(content) else {
        return Ok(None);
    };

    let mut lines = content[heading.start()..].split('\n');
    let mut section: Vec<&str> = lines.next().into_iter().collect();
    for line in lines {
        if NUMBERED_HEADING_RE.is_match(line) || SECTION_HEADING_RE.is_match(line) {
            break;
        }
        section.push(line);
    }

    let text = section.join("\n").trim().to_string();
    Ok((!text.is_empty()).then_some(text))
}

/// Title (from the first few lines) followed by the first headings of the file.
fn summarize(content: &str, path: &str) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut summary: Vec<&str> = lines
        .iter()
        .take(TITLE_SCAN_LINES)
        .find(|l| l.starts_with("# "))
        .copied()
        .into_iter()
        .collect();
    summary.extend(
        lines
            .iter()
            .filter(|l| ANY_HEADING_RE.is_match(l))
            .take(SUMMARY_HEADINGS),
    );

    if summary.is_empty() {
        format!("Content available in {} (no specific section extracted)", path)
    } else {
        format!("Content from {}:\n\n{}", path, summary.join("\n"))
    }
}

// ── Tests ──
