use std::sync::LazyLock;

use regex::Regex;

use super::fields::{or_placeholder, question_text, EXPECTED_POINTS};
use crate::model::AlternativeRecord;

static REGION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^### Alternative.*Questions").unwrap());
static ITEM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#### Alternative").unwrap());

/// Scan the whole document for `### Alternative ... Questions` regions and
/// pull one record per `#### Alternative` heading inside them.
pub fn extract(content: &str) -> Vec<AlternativeRecord> {
    let lines: Vec<&str> = content.lines().collect();
    let mut records = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if !REGION_RE.is_match(lines[i]) {
            i += 1;
            continue;
        }
        let start = i + 1;
        let end = lines[start..]
            .iter()
            .position(|l| closes_region(l))
            .map_or(lines.len(), |p| start + p);
        collect_items(&lines[start..end], &mut records);
        i = end;
    }

    records
}

fn collect_items(region: &[&str], records: &mut Vec<AlternativeRecord>) {
    for (j, line) in region.iter().enumerate() {
        if !ITEM_RE.is_match(line) {
            continue;
        }
        let body_start = j + 1;
        let body_end = region[body_start..]
            .iter()
            .position(|l| heading_level(l).is_some())
            .map_or(region.len(), |p| body_start + p);
        let body = region[body_start..body_end].join("\n");

        records.push(AlternativeRecord {
            question_text: or_placeholder(question_text(&body)),
            expected_answer: or_placeholder(EXPECTED_POINTS.find(&body)),
        });
    }
}

/// A region ends at a heading of level 1-3 or a horizontal rule.
fn closes_region(line: &str) -> bool {
    line.starts_with("---") || heading_level(line).is_some_and(|level| level <= 3)
}

fn heading_level(line: &str) -> Option<usize> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    let rest = &line[hashes..];
    (hashes > 0 && (rest.starts_with(' ') || rest.starts_with('\t'))).then_some(hashes)
}

// ── Tests ──
