use std::sync::LazyLock;

use regex::Regex;

static PART_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^## (Part \d+.*?)$").unwrap());
static QUESTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^### ((?:Question|Challenge|SQL Query|Database Schema Design|Scenario).*?)$")
        .unwrap()
});

/// A `## Part N` section: heading text plus everything up to the next part heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Part<'a> {
    pub title: &'a str,
    pub body: &'a str,
}

/// A `### Question|Challenge|...` block inside a part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionBlock<'a> {
    pub title: &'a str,
    pub body: &'a str,
}

/// Split a document into its parts, in document order. Text before the
/// first part heading is dropped.
pub fn split_parts(content: &str) -> Vec<Part<'_>> {
    split_on(&PART_RE, content)
        .into_iter()
        .map(|(title, body)| Part { title, body })
        .collect()
}

/// Split a part body into question blocks. Headings outside the recognised
/// vocabulary stay inside the preceding block.
pub fn split_questions(part_body: &str) -> Vec<QuestionBlock<'_>> {
    split_on(&QUESTION_RE, part_body)
        .into_iter()
        .map(|(title, body)| QuestionBlock { title, body })
        .collect()
}

/// (captured heading text, body up to the next heading match) pairs.
fn split_on<'a>(re: &Regex, text: &'a str) -> Vec<(&'a str, &'a str)> {
    let heads: Vec<_> = re
        .captures_iter(text)
        .filter_map(|c| Some((c.get(0)?, c.get(1)?)))
        .collect();

    heads
        .iter()
        .enumerate()
        .map(|(i, (whole, title))| {
            let end = heads.get(i + 1).map_or(text.len(), |(next, _)| next.start());
            (title.as_str(), &text[whole.end()..end])
        })
        .collect()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_part_headings() {
        assert!(split_parts("").is_empty());
        assert!(split_parts("# Title\n\n## Overview\n\n### Question 1\n").is_empty());
    }

    #[test]
    fn preamble_dropped_and_order_kept() {
        let md = "# Doc\nintro\n## Part 1: Basics\nalpha\n## Part 2: Advanced\nbeta\n";
        let parts = split_parts(md);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].title, "Part 1: Basics");
        assert_eq!(parts[0].body, "\nalpha\n");
        assert_eq!(parts[1].title, "Part 2: Advanced");
        assert_eq!(parts[1].body, "\nbeta\n");
    }

    #[test]
    fn deeper_or_unnumbered_headings_are_not_parts() {
        let md = "### Part 1: Nested\n## Part one\n## Part 3 (10 minutes)\nbody";
        let parts = split_parts(md);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].title, "Part 3 (10 minutes)");
    }

    #[test]
    fn question_vocabulary() {
        let body = "\n### Question 1 (5 minutes)\na\n### Challenge: Cache\nb\n### SQL Query\nc\n\
                    ### Database Schema Design\nd\n### Scenario: Outage\ne\n";
        let titles: Vec<_> = split_questions(body).iter().map(|q| q.title).collect();
        assert_eq!(
            titles,
            vec![
                "Question 1 (5 minutes)",
                "Challenge: Cache",
                "SQL Query",
                "Database Schema Design",
                "Scenario: Outage"
            ]
        );
    }

    #[test]
    fn unknown_headings_absorbed() {
        let body = "### Notes\nskipped\n### Question 1\nfirst\n### Hints\nstill first\n### Question 2\nsecond";
        let blocks = split_questions(body);
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].body.contains("### Hints\nstill first"));
        assert!(!blocks[0].body.contains("skipped"));
        assert_eq!(blocks[1].body, "\nsecond");
    }

    #[test]
    fn part_without_blocks() {
        assert!(split_questions("just prose\n#### Question deeper\n").is_empty());
    }
}
