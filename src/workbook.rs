use std::borrow::Cow;
use std::path::Path;

use rust_xlsxwriter::{Format, FormatAlign, Workbook};
use tracing::warn;

use crate::error::WorkbookError;
use crate::model::{AlternativeRecord, ProcessedLevel, QuestionRecord, SummaryRow};

pub const QUESTION_HEADERS: [&str; 8] = [
    "Part",
    "Question Title",
    "Question Text",
    "Expected Answer Points",
    "Code Answer",
    "Follow-up Questions",
    "Reference Link",
    "Reference Content",
];
pub const ALTERNATIVE_HEADERS: [&str; 2] = ["Alternative Question Text", "Expected Answer Points"];
pub const SUMMARY_HEADERS: [&str; 7] = [
    "Level",
    "Title",
    "Duration",
    "Format",
    "Target Level",
    "Number of Questions",
    "Number of Alternatives",
];
pub const SUMMARY_SHEET: &str = "Summary";

/// Excel's per-cell text limit.
const MAX_CELL_CHARS: usize = 32_767;
const FONT_SIZE: f64 = 14.0;

enum Cell<'a> {
    Text(&'a str),
    Count(usize),
}

impl Cell<'_> {
    fn width_chars(&self) -> usize {
        match self {
            Cell::Text(t) => t.chars().count(),
            Cell::Count(n) => n.to_string().len(),
        }
    }
}

/// Assemble the whole workbook in memory: per level a Questions and an
/// Alternatives sheet (each only when non-empty), then the shared Summary.
pub fn build(levels: &[ProcessedLevel], summary: &[SummaryRow]) -> Result<Workbook, WorkbookError> {
    let mut workbook = Workbook::new();

    for processed in levels {
        let set = &processed.set;
        if !set.questions.is_empty() {
            let rows = set.questions.iter().map(question_row).collect();
            add_table(
                &mut workbook,
                &format!("{}_Questions", processed.level),
                &QUESTION_HEADERS,
                rows,
            )?;
        }
        if !set.alternatives.is_empty() {
            let rows = set.alternatives.iter().map(alternative_row).collect();
            add_table(
                &mut workbook,
                &format!("{}_Alternatives", processed.level),
                &ALTERNATIVE_HEADERS,
                rows,
            )?;
        }
    }

    let rows = summary.iter().map(summary_row).collect();
    add_table(&mut workbook, SUMMARY_SHEET, &SUMMARY_HEADERS, rows)?;

    Ok(workbook)
}

pub fn write(path: &Path, levels: &[ProcessedLevel], summary: &[SummaryRow]) -> Result<(), WorkbookError> {
    let mut workbook = build(levels, summary)?;
    workbook.save(path)?;
    Ok(())
}

fn question_row(q: &QuestionRecord) -> Vec<Cell<'_>> {
    [
        &q.part,
        &q.question_title,
        &q.question_text,
        &q.expected_answer,
        &q.code_answer,
        &q.followup,
        &q.reference_link,
        &q.reference_content,
    ]
    .into_iter()
    .map(|s| Cell::Text(s))
    .collect()
}

fn alternative_row(a: &AlternativeRecord) -> Vec<Cell<'_>> {
    vec![Cell::Text(&a.question_text), Cell::Text(&a.expected_answer)]
}

fn summary_row(s: &SummaryRow) -> Vec<Cell<'_>> {
    vec![
        Cell::Text(&s.level),
        Cell::Text(&s.title),
        Cell::Text(&s.duration),
        Cell::Text(&s.format),
        Cell::Text(&s.target_level),
        Cell::Count(s.question_count),
        Cell::Count(s.alternative_count),
    ]
}

fn add_table(
    workbook: &mut Workbook,
    name: &str,
    headers: &[&str],
    rows: Vec<Vec<Cell<'_>>>,
) -> Result<(), WorkbookError> {
    let body = Format::new()
        .set_font_size(FONT_SIZE)
        .set_text_wrap()
        .set_align(FormatAlign::Top);
    let header = body.clone().set_bold();

    let sheet = workbook.add_worksheet();
    sheet
        .set_name(name)
        .map_err(|_| WorkbookError::SheetName(name.to_string()))?;

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for (col, text) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *text, &header)?;
    }

    for (r, row) in rows.iter().enumerate() {
        let r = (r + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Cell::Text(t) => {
                    sheet.write_string_with_format(r, col as u16, &*clamp(t, name), &body)?;
                }
                Cell::Count(n) => {
                    sheet.write_number_with_format(r, col as u16, *n as f64, &body)?;
                }
            }
            if let Some(w) = widths.get_mut(col) {
                *w = (*w).max(cell.width_chars());
            }
        }
    }

    for (col, longest) in widths.into_iter().enumerate() {
        sheet.set_column_width(col as u16, column_width(longest))?;
    }
    Ok(())
}

/// Wide columns for long content so it wraps; otherwise fit to content, capped at 40.
fn column_width(longest: usize) -> f64 {
    match longest {
        n if n > 300 => 80.0,
        n if n > 100 => 60.0,
        n => (n + 5).min(40) as f64,
    }
}

fn clamp<'a>(text: &'a str, sheet: &str) -> Cow<'a, str> {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((cut, _)) => {
            warn!("Truncating {}-char cell in sheet {}", text.chars().count(), sheet);
            Cow::Owned(text[..cut].to_string())
        }
        None => Cow::Borrowed(text),
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InterviewSet, PLACEHOLDER};
    use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
    use std::io::Cursor;

    fn question(part: &str, code: &str) -> QuestionRecord {
        QuestionRecord {
            part: part.into(),
            question_title: "Question 1 (5 minutes)".into(),
            question_text: "What is a slice?".into(),
            expected_answer: "Pointer, length, capacity.".into(),
            followup: PLACEHOLDER.into(),
            time_allocation: "5 minutes".into(),
            reference_link: PLACEHOLDER.into(),
            reference_content: PLACEHOLDER.into(),
            code_answer: code.into(),
        }
    }

    fn level(name: &str, questions: Vec<QuestionRecord>, alternatives: Vec<AlternativeRecord>) -> ProcessedLevel {
        ProcessedLevel {
            level: name.into(),
            set: InterviewSet {
                title: format!("{name} Interview"),
                duration: "60 minutes".into(),
                format: PLACEHOLDER.into(),
                target_level: name.into(),
                questions,
                alternatives,
            },
        }
    }

    fn read_back(levels: &[ProcessedLevel]) -> Xlsx<Cursor<Vec<u8>>> {
        let summary: Vec<SummaryRow> = levels.iter().map(|l| SummaryRow::new(&l.level, &l.set)).collect();
        let buf = build(levels, &summary).unwrap().save_to_buffer().unwrap();
        open_workbook_from_rs(Cursor::new(buf)).unwrap()
    }

    fn text_at(range: &calamine::Range<Data>, row: u32, col: u32) -> String {
        match range.get_value((row, col)) {
            Some(Data::String(s)) => s.clone(),
            Some(Data::Empty) | None => String::new(),
            Some(other) => format!("{:?}", other),
        }
    }

    #[test]
    fn sheets_follow_level_content() {
        let alt = AlternativeRecord {
            question_text: "What is an interface?".into(),
            expected_answer: PLACEHOLDER.into(),
        };
        let levels = vec![
            level("Junior", vec![question("Part 1: Basics", "")], vec![alt]),
            level("Intermediate", vec![question("Part 1: Data", "")], vec![]),
            level("Senior", vec![], vec![]),
        ];
        let mut book = read_back(&levels);
        assert_eq!(
            book.sheet_names(),
            vec![
                "Junior_Questions",
                "Junior_Alternatives",
                "Intermediate_Questions",
                "Summary"
            ]
        );

        let questions = book.worksheet_range("Junior_Questions").unwrap();
        for (col, header) in QUESTION_HEADERS.iter().enumerate() {
            assert_eq!(text_at(&questions, 0, col as u32), *header);
        }
        assert_eq!(text_at(&questions, 1, 0), "Part 1: Basics");
        assert_eq!(text_at(&questions, 1, 2), "What is a slice?");
        assert_eq!(text_at(&questions, 1, 4), "");

        let summary = book.worksheet_range(SUMMARY_SHEET).unwrap();
        assert_eq!(summary.height(), 4);
        assert_eq!(text_at(&summary, 1, 0), "Junior");
        assert_eq!(text_at(&summary, 3, 0), "Senior");
        assert_eq!(summary.get_value((1, 5)), Some(&Data::Float(1.0)));
        assert_eq!(summary.get_value((1, 6)), Some(&Data::Float(1.0)));
        assert_eq!(summary.get_value((3, 5)), Some(&Data::Float(0.0)));
    }

    #[test]
    fn summary_without_levels_has_headers_only() {
        let mut book = read_back(&[]);
        assert_eq!(book.sheet_names(), vec![SUMMARY_SHEET]);
        let summary = book.worksheet_range(SUMMARY_SHEET).unwrap();
        assert_eq!(summary.height(), 1);
        assert_eq!(text_at(&summary, 0, 6), "Number of Alternatives");
    }

    #[test]
    fn oversized_cells_are_truncated() {
        let huge = "x".repeat(MAX_CELL_CHARS + 10);
        let mut book = read_back(&[level("Senior", vec![question("Part 1", &huge)], vec![])]);
        let questions = book.worksheet_range("Senior_Questions").unwrap();
        assert_eq!(text_at(&questions, 1, 4).chars().count(), MAX_CELL_CHARS);
    }

    #[test]
    fn invalid_level_name_is_reported() {
        let levels = vec![level("Lead/Staff", vec![question("Part 1", "")], vec![])];
        let Err(err) = build(&levels, &[]) else {
            panic!("sheet name with a slash was accepted");
        };
        assert!(matches!(err, WorkbookError::SheetName(name) if name == "Lead/Staff_Questions"));
    }

    #[test]
    fn width_rules() {
        assert_eq!(column_width(4), 9.0);
        assert_eq!(column_width(35), 40.0);
        assert_eq!(column_width(100), 40.0);
        assert_eq!(column_width(101), 60.0);
        assert_eq!(column_width(301), 80.0);
    }

    #[test]
    fn clamp_keeps_short_text() {
        assert!(matches!(clamp("short", "Summary"), Cow::Borrowed("short")));
    }
}
