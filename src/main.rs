mod document;
mod error;
mod export;
mod model;
mod parser;
mod reference;
mod settings;
mod workbook;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use model::ProcessedLevel;
use settings::Settings;

#[derive(Parser)]
#[command(name = "interview_export", about = "Export interview question banks from markdown to Excel")]
struct Cli {
    /// Directory containing the interview markdown files
    #[arg(long, global = true)]
    interviews_dir: Option<PathBuf>,
    /// Output Excel file
    #[arg(long, global = true)]
    output: Option<PathBuf>,
    /// Optional TOML settings file
    #[arg(long, global = true, default_value = settings::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse every level and write the workbook (default)
    Export,
    /// Parse levels and print what would be exported
    Inspect {
        /// Only this level (e.g. "Junior")
        #[arg(short, long)]
        level: Option<String>,
        /// Print the parsed interview sets as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::load(&cli.config)?.with_overrides(cli.interviews_dir, cli.output);

    match cli.command.unwrap_or(Commands::Export) {
        Commands::Export => {
            export::export(&settings)?;
            println!("Excel file exported successfully: {}", settings.output.display());
            Ok(())
        }
        Commands::Inspect { level, json } => {
            let extractor = parser::Extractor::new(&settings).context("Invalid language profile")?;
            let mut levels = export::collect_levels(&settings, &extractor)?;
            if let Some(name) = level.as_deref() {
                levels.retain(|l| l.level.eq_ignore_ascii_case(name));
            }
            if levels.is_empty() {
                println!("No interview files found in {}", settings.interviews_dir.display());
                return Ok(());
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&levels)?);
            } else {
                for processed in &levels {
                    print_level(processed);
                }
            }
            Ok(())
        }
    }
}

fn print_level(processed: &ProcessedLevel) {
    let set = &processed.set;
    println!("\n== {} | {} ({}, {}) ==", processed.level, set.title, set.duration, set.format);
    println!(
        "{:>3} | {:<28} | {:<32} | {:<10} | {:<40} | {:>4}",
        "#", "Part", "Question", "Time", "Question Text", "Code"
    );
    println!("{}", "-".repeat(136));

    for (i, q) in set.questions.iter().enumerate() {
        let code = if q.code_answer.is_empty() { "-" } else { "yes" };
        println!(
            "{:>3} | {:<28} | {:<32} | {:<10} | {:<40} | {:>4}",
            i + 1,
            truncate(&q.part, 28),
            truncate(&q.question_title, 32),
            truncate(&q.time_allocation, 10),
            truncate(&q.question_text.replace('\n', " "), 40),
            code
        );
    }

    if !set.alternatives.is_empty() {
        println!("\n--- Alternatives ---");
        for a in &set.alternatives {
            println!("  {}", truncate(&a.question_text.replace('\n', " "), 100));
        }
    }

    println!(
        "\n{} questions | {} alternatives",
        set.questions.len(),
        set.alternatives.len()
    );
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}
