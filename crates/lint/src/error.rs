use std::path::PathBuf;

/// Fatal linter outcomes.
#[derive(Debug, thiserror::Error)]
pub enum LintError {
    /// Templates read keys the symbol table does not define. Lists every
    /// missing key, sorted, so one run reports all of them.
    #[error("missing keys referenced in templates: {}", .keys.join(", "))]
    MissingKeys { keys: Vec<String> },

    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("cannot read template corpus at '{}': {message}", .path.display())]
    Corpus { path: PathBuf, message: String },
}
