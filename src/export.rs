use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use crate::document::Document;
use crate::model::{ProcessedLevel, SummaryRow};
use crate::parser::Extractor;
use crate::settings::Settings;
use crate::workbook;

/// Parse every configured level whose file exists, in configuration order.
/// Missing level files are skipped; a missing input directory is fatal.
pub fn collect_levels(settings: &Settings, extractor: &Extractor) -> Result<Vec<ProcessedLevel>> {
    if !settings.interviews_dir.is_dir() {
        bail!("Directory '{}' not found", settings.interviews_dir.display());
    }

    let mut processed = Vec::with_capacity(settings.levels.len());
    for level in &settings.levels {
        let path = settings.level_path(level);
        if !path.exists() {
            warn!("{} not found, skipping {} level", level.file, level.name);
            continue;
        }

        info!("Processing {} level: {}", level.name, level.file);
        let doc = Document::load(&path)?;
        let set = extractor.parse(&doc);
        info!(
            level = %level.name,
            questions = set.questions.len(),
            alternatives = set.alternatives.len(),
            "Parsed interview set"
        );
        processed.push(ProcessedLevel {
            level: level.name.clone(),
            set,
        });
    }
    Ok(processed)
}

pub fn summarize(levels: &[ProcessedLevel]) -> Vec<SummaryRow> {
    levels
        .iter()
        .map(|l| SummaryRow::new(&l.level, &l.set))
        .collect()
}

/// Full run: parse all levels, then write the workbook once.
pub fn export(settings: &Settings) -> Result<Vec<SummaryRow>> {
    let extractor = Extractor::new(settings).context("Invalid language profile")?;
    let levels = collect_levels(settings, &extractor)?;
    let summary = summarize(&levels);

    workbook::write(&settings.output, &levels, &summary)
        .with_context(|| format!("Failed to write {}", settings.output.display()))?;
    info!("Wrote {} level(s) to {}", summary.len(), settings.output.display());
    Ok(summary)
}

// ── Tests ──
