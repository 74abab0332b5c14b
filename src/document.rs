use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// A loaded markdown file. Line endings are normalised to `\n`.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub text: String,
}

impl Document {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Self::from_text(path, &raw))
    }

    pub fn from_text(path: &Path, text: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            text: normalize_newlines(text),
        }
    }

    /// File name without extension, used when the document has no `# ` title.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Windows line endings to `\n`, so `$`-anchored captures never carry `\r`.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_normalises_crlf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junior-go-developer.md");
        fs::write(&path, "# Title\r\n\r\n## Part 1: Basics\r\n").unwrap();

        let doc = Document::load(&path).unwrap();
        assert_eq!(doc.text, "# Title\n\n## Part 1: Basics\n");
        assert_eq!(doc.stem(), "junior-go-developer");
    }

    #[test]
    fn load_missing_file_names_path() {
        let err = Document::load(Path::new("no/such/bank.md")).unwrap_err();
        assert!(err.to_string().contains("no/such/bank.md"));
    }
}
