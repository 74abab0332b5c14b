use std::sync::LazyLock;

use regex::Regex;

use super::fields::CODE_EXAMPLE;
use crate::settings::LanguageProfile;

static UNTAGGED_FENCE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```\s*\n(.*?)\n```").unwrap());

/// Fences introduced by an answer/solution label, in search order.
static SOLUTION_FENCE_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?si)\*\*Expected.*?Answer.*?\*\*:?\s*```.*?\n(.*?)\n```",
        r"(?si)\*\*Expected.*?Solution.*?\*\*:?\s*```.*?\n(.*?)\n```",
        r"(?si)\*\*Solution.*?\*\*:?\s*```.*?\n(.*?)\n```",
        r"(?si)### Expected Solution Structure\s*```.*?\n(.*?)\n```",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

pub const CODE_SEPARATOR: &str = "\n\n--- CODE BLOCK ---\n\n";

/// Snippets whose trimmed length does not exceed this are noise.
const MIN_SNIPPET_CHARS: usize = 20;

/// Pulls solution code out of coding-question blocks.
#[derive(Debug, Clone)]
pub struct CodeExtractor {
    tagged_fence: Regex,
    keywords: Vec<String>,
    indicators: Vec<String>,
}

impl CodeExtractor {
    pub fn new(profile: &LanguageProfile) -> Result<Self, regex::Error> {
        let tagged_fence = Regex::new(&format!(
            r"(?s)```{}\s*\n(.*?)\n```",
            regex::escape(&profile.fence_tag)
        ))?;
        Ok(Self {
            tagged_fence,
            keywords: profile.keywords.clone(),
            indicators: profile
                .coding_indicators
                .iter()
                .map(|s| s.to_lowercase())
                .collect(),
        })
    }

    pub fn is_coding_question(&self, body: &str) -> bool {
        let lower = body.to_lowercase();
        self.indicators.iter().any(|ind| lower.contains(ind.as_str()))
    }

    /// Joined code snippets for a coding question; empty string otherwise or
    /// when nothing usable is found.
    pub fn extract(&self, body: &str) -> String {
        if !self.is_coding_question(body) {
            return String::new();
        }

        let mut snippets: Vec<&str> = captures(&self.tagged_fence, body).collect();
        snippets.extend(
            captures(&UNTAGGED_FENCE_RE, body)
                .filter(|block| self.keywords.iter().any(|kw| block.contains(kw.as_str()))),
        );
        for re in SOLUTION_FENCE_RES.iter() {
            snippets.extend(captures(re, body));
        }

        let kept: Vec<&str> = snippets
            .into_iter()
            .map(str::trim)
            .filter(|s| s.chars().count() > MIN_SNIPPET_CHARS)
            .collect();
        if !kept.is_empty() {
            return kept.join(CODE_SEPARATOR);
        }

        CODE_EXAMPLE.find(body).unwrap_or_default().to_string()
    }
}

fn captures<'a>(re: &'a Regex, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    re.captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
}

// ── Tests ──
