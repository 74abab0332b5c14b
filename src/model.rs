use serde::Serialize;

/// Stand-in for any labeled field whose pattern did not match.
pub const PLACEHOLDER: &str = "N/A";

/// One primary question block. Every field is always populated: a missing
/// field holds `PLACEHOLDER`, except `code_answer`, which is empty for
/// non-coding questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionRecord {
    pub part: String,
    pub question_title: String,
    pub question_text: String,
    pub expected_answer: String,
    pub followup: String,
    pub time_allocation: String,
    pub reference_link: String,
    pub reference_content: String,
    pub code_answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlternativeRecord {
    pub question_text: String,
    pub expected_answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterviewSet {
    pub title: String,
    pub duration: String,
    pub format: String,
    pub target_level: String,
    pub questions: Vec<QuestionRecord>,
    pub alternatives: Vec<AlternativeRecord>,
}

/// One row of the shared Summary sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub level: String,
    pub title: String,
    pub duration: String,
    pub format: String,
    pub target_level: String,
    pub question_count: usize,
    pub alternative_count: usize,
}

impl SummaryRow {
    pub fn new(level: &str, set: &InterviewSet) -> Self {
        Self {
            level: level.to_string(),
            title: set.title.clone(),
            duration: set.duration.clone(),
            format: set.format.clone(),
            target_level: set.target_level.clone(),
            question_count: set.questions.len(),
            alternative_count: set.alternatives.len(),
        }
    }
}

/// A level whose file was found and parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedLevel {
    pub level: String,
    #[serde(flatten)]
    pub set: InterviewSet,
}
