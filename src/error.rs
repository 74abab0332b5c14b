use thiserror::Error;

/// Failures inside reference resolution. Never surfaced to callers of
/// `ReferenceResolver::resolve`, which folds them into its output string.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("{path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid anchor pattern: {0}")]
    Pattern(#[from] regex::Error),
}

#[derive(Error, Debug)]
pub enum WorkbookError {
    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("invalid sheet name '{0}'")]
    SheetName(String),
}
