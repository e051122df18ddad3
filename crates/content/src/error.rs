use hbpress_core::CompileError;

/// Fatal content-shape errors.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ContentError {
    /// The content source could not be loaded.
    #[error(transparent)]
    Source(#[from] CompileError),

    /// A required part ended up with no contributing rows.
    #[error("content part '{part}' has no items")]
    EmptyPart { part: String },

    /// A single-value part received more than one row under strict mode.
    #[error("line {line}: single-value part '{part}' already set at line {first_line}")]
    MultipleCandidates {
        part: String,
        line: usize,
        first_line: usize,
    },

    /// The template lacks placeholders the caller asked to fill.
    #[error("template is missing placeholder(s): {}", tokens(.placeholders))]
    MissingPlaceholder { placeholders: Vec<String> },

    #[error("invalid content schema: {0}")]
    InvalidSchema(String),
}

fn tokens(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("{{{{ {} }}}}", n))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_placeholder_message() {
        let e = ContentError::MissingPlaceholder {
            placeholders: vec!["safety_items".into(), "lead".into()],
        };
        assert_eq!(
            e.to_string(),
            "template is missing placeholder(s): {{ safety_items }}, {{ lead }}"
        );
    }

    #[test]
    fn source_errors_pass_through() {
        let e: ContentError = CompileError::malformed("c.csv", "no header row").into();
        assert_eq!(e.to_string(), "c.csv: malformed source: no header row");
    }
}
