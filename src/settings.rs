use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

const ENV_PREFIX: &str = "INTERVIEW_EXPORT";
pub const DEFAULT_CONFIG_FILE: &str = "interview_export.toml";

/// Runtime settings: built-in defaults, then an optional TOML file, then
/// `INTERVIEW_EXPORT_*` environment variables, then CLI flags.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub interviews_dir: PathBuf,
    pub output: PathBuf,
    /// Directory that reference citations resolve against.
    pub reference_root: PathBuf,
    pub levels: Vec<Level>,
    pub language: LanguageProfile,
}

/// A seniority level and the markdown file holding its question bank.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Level {
    pub name: String,
    pub file: String,
}

/// What counts as a coding question and as code in the target language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LanguageProfile {
    /// Info string of fenced blocks written in the target language.
    pub fence_tag: String,
    /// Any of these inside an untagged fence marks it as target-language code.
    pub keywords: Vec<String>,
    /// Case-insensitive phrases that classify a block as a coding question.
    pub coding_indicators: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interviews_dir: PathBuf::from("interviews"),
            output: PathBuf::from("interview_questions.xlsx"),
            reference_root: PathBuf::from("."),
            levels: vec![
                Level::new("Junior", "junior-go-developer.md"),
                Level::new("Intermediate", "intermediate-go-developer.md"),
                Level::new("Senior", "senior-go-developer.md"),
            ],
            language: LanguageProfile::default(),
        }
    }
}

impl Default for LanguageProfile {
    fn default() -> Self {
        Self {
            fence_tag: "go".into(),
            keywords: strings(&["package", "import", "func", "type", "var", "const", "go ", "chan", "select"]),
            coding_indicators: strings(&[
                "Challenge:",
                "Coding",
                "Implementation",
                "Algorithm",
                "Write a",
                "Implement",
                "Create a Go",
                "Design and implement",
            ]),
        }
    }
}

impl Level {
    pub fn new(name: &str, file: &str) -> Self {
        Self {
            name: name.to_string(),
            file: file.to_string(),
        }
    }
}

impl Settings {
    /// Load defaults, the optional file at `path`, and the environment.
    pub fn load(path: &Path) -> Result<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Apply CLI flags on top of the loaded settings.
    pub fn with_overrides(mut self, interviews_dir: Option<PathBuf>, output: Option<PathBuf>) -> Self {
        if let Some(dir) = interviews_dir {
            self.interviews_dir = dir;
        }
        if let Some(out) = output {
            self.output = out;
        }
        self
    }

    pub fn level_path(&self, level: &Level) -> PathBuf {
        self.interviews_dir.join(&level.file)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings.interviews_dir, PathBuf::from("interviews"));
        assert_eq!(settings.levels.len(), 3);
        assert_eq!(settings.levels[0], Level::new("Junior", "junior-go-developer.md"));
        assert_eq!(settings.language.fence_tag, "go");
    }

    #[test]
    fn file_overrides_selected_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.toml");
        std::fs::write(
            &path,
            r#"
output = "banks.xlsx"

[[levels]]
name = "Staff"
file = "staff-rust-developer.md"

[language]
fence_tag = "rust"
"#,
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.output, PathBuf::from("banks.xlsx"));
        assert_eq!(settings.interviews_dir, PathBuf::from("interviews"));
        assert_eq!(settings.levels, vec![Level::new("Staff", "staff-rust-developer.md")]);
        assert_eq!(settings.language.fence_tag, "rust");
        assert!(settings.language.coding_indicators.contains(&"Implement".to_string()));
    }

    #[test]
    fn cli_flags_win() {
        let settings = Settings::default()
            .with_overrides(Some(PathBuf::from("banks")), None);
        assert_eq!(settings.interviews_dir, PathBuf::from("banks"));
        assert_eq!(settings.output, PathBuf::from("interview_questions.xlsx"));
        assert_eq!(
            settings.level_path(&settings.levels[2]),
            PathBuf::from("banks").join("senior-go-developer.md")
        );
    }
}
