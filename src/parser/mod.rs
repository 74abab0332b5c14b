pub mod alternatives;
pub mod code;
pub mod fields;
pub mod metadata;
pub mod sections;

use crate::document::Document;
use crate::model::{InterviewSet, QuestionRecord};
use crate::reference::ReferenceResolver;
use crate::settings::Settings;
use code::CodeExtractor;
use sections::{Part, QuestionBlock};

/// Markdown → parts → question blocks → records, with references resolved on the side.
#[derive(Debug, Clone)]
pub struct Extractor {
    resolver: ReferenceResolver,
    code: CodeExtractor,
}

impl Extractor {
    pub fn new(settings: &Settings) -> Result<Self, regex::Error> {
        Ok(Self {
            resolver: ReferenceResolver::new(&settings.reference_root),
            code: CodeExtractor::new(&settings.language)?,
        })
    }

    pub fn parse(&self, doc: &Document) -> InterviewSet {
        let meta = metadata::extract(&doc.text, &doc.stem());
        InterviewSet {
            title: meta.title,
            duration: meta.duration,
            format: meta.format,
            target_level: meta.target_level,
            questions: self.questions(&doc.text),
            alternatives: alternatives::extract(&doc.text),
        }
    }

    pub fn questions(&self, content: &str) -> Vec<QuestionRecord> {
        sections::split_parts(content)
            .iter()
            .flat_map(|part| {
                sections::split_questions(part.body)
                    .into_iter()
                    .map(move |block| (*part, block))
            })
            .map(|(part, block)| self.record(&part, &block))
            .collect()
    }

    fn record(&self, part: &Part, block: &QuestionBlock) -> QuestionRecord {
        let f = fields::extract(block.title, block.body);
        let reference_content = self.resolver.resolve(&f.reference_link);
        QuestionRecord {
            part: part.title.to_string(),
            question_title: block.title.to_string(),
            question_text: f.question_text,
            expected_answer: f.expected_answer,
            followup: f.followup,
            time_allocation: f.time_allocation,
            reference_link: f.reference_link,
            reference_content,
            code_answer: self.code.extract(block.body),
        }
    }
}

// ── Tests ──
