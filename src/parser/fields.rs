use std::sync::LazyLock;

use regex::Regex;

use crate::model::PLACEHOLDER;

static QUOTED_QUESTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"(?s)\*\*"(.+?)"\*\*"#).unwrap());
static TIME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\((\d+.*?minutes?)\)").unwrap());

static EXPECTED_POINTS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\*\*Expected.*?Answer.*?Points?\*\*:").unwrap());
static PROBLEM_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\*\*(?:Problem Statement|Expected Solution.*?)\*\*").unwrap());
static PROBLEM_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)### (?:Problem Statement|Expected Solution.*?)").unwrap());
static FOLLOWUP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\*\*Follow-up.*?\*\*:").unwrap());
static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*Reference\*\*:").unwrap());
static CODE_EXAMPLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?si)\*\*Expected.*?Code.*?Example.*?\*\*:?").unwrap());

/// A labeled value runs until the next bold label, a horizontal rule, or the end of the block.
const BOLD_TERMINATORS: &[&str] = &["**", "---"];
const HEADING_TERMINATORS: &[&str] = &["###", "---"];

/// A label pattern plus the markers that end the value following it.
pub struct LabeledField {
    label: &'static LazyLock<Regex>,
    terminators: &'static [&'static str],
}

impl LabeledField {
    /// Trimmed value after the first label match, if any.
    pub fn find<'a>(&self, text: &'a str) -> Option<&'a str> {
        let label = self.label.find(text)?;
        capture_until(&text[label.end()..], self.terminators).map(str::trim)
    }
}

pub static EXPECTED_POINTS: LabeledField = LabeledField {
    label: &EXPECTED_POINTS_RE,
    terminators: BOLD_TERMINATORS,
};
pub static FOLLOWUP: LabeledField = LabeledField {
    label: &FOLLOWUP_RE,
    terminators: BOLD_TERMINATORS,
};
pub static REFERENCE: LabeledField = LabeledField {
    label: &REFERENCE_RE,
    terminators: BOLD_TERMINATORS,
};
pub static CODE_EXAMPLE: LabeledField = LabeledField {
    label: &CODE_EXAMPLE_RE,
    terminators: BOLD_TERMINATORS,
};

/// Expected-answer label variants, highest priority first.
pub static EXPECTED_ANSWER_CHAIN: [LabeledField; 3] = [
    LabeledField {
        label: &EXPECTED_POINTS_RE,
        terminators: BOLD_TERMINATORS,
    },
    LabeledField {
        label: &PROBLEM_LABEL_RE,
        terminators: BOLD_TERMINATORS,
    },
    LabeledField {
        label: &PROBLEM_HEADING_RE,
        terminators: HEADING_TERMINATORS,
    },
];

/// First field in `chain` that matches wins.
pub fn first_match<'a>(chain: &[LabeledField], text: &'a str) -> Option<&'a str> {
    chain.iter().find_map(|field| field.find(text))
}

/// The value text after a label: leading whitespace skipped, at least one
/// character taken, then cut at the earliest terminator.
fn capture_until<'a>(rest: &'a str, terminators: &[&str]) -> Option<&'a str> {
    if rest.is_empty() {
        return None;
    }
    let body = rest.trim_start();
    let Some(first) = body.chars().next() else {
        return Some("");
    };
    let from = first.len_utf8();
    let end = terminators
        .iter()
        .filter_map(|t| body[from..].find(t))
        .min()
        .map_or(body.len(), |i| i + from);
    Some(&body[..end])
}

/// Labeled fields of one question block, each defaulted independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionFields {
    pub question_text: String,
    pub expected_answer: String,
    pub followup: String,
    pub reference_link: String,
    pub time_allocation: String,
}

pub fn extract(title: &str, body: &str) -> QuestionFields {
    QuestionFields {
        question_text: or_placeholder(question_text(body)),
        expected_answer: or_placeholder(first_match(&EXPECTED_ANSWER_CHAIN, body)),
        followup: or_placeholder(FOLLOWUP.find(body)),
        reference_link: or_placeholder(REFERENCE.find(body)),
        time_allocation: or_placeholder(time_allocation(title)),
    }
}

/// Text of the first `**"..."**` span; may cover several lines.
pub fn question_text(body: &str) -> Option<&str> {
    QUOTED_QUESTION_RE
        .captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// `(N minutes)` annotation from a block title.
pub fn time_allocation(title: &str) -> Option<&str> {
    TIME_RE.captures(title).and_then(|c| c.get(1)).map(|m| m.as_str())
}

pub fn or_placeholder(value: Option<&str>) -> String {
    value.unwrap_or(PLACEHOLDER).to_string()
}

// ── Tests ──
