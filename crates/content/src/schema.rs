//! Content schema: which parts exist, how each renders, and which template
//! placeholder it fills.
//!
//! One schema object replaces per-document variants of the renderer; the
//! same builder and injector serve every document.

use crate::error::ContentError;
use crate::inject::is_placeholder_name;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How rows of a part are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartKind {
    /// Bullet list; each row is one item with optional nested lines.
    List,
    /// Exactly one value (e.g. a lead sentence).
    Single,
    /// Exactly one value rendered as an underlined section title.
    Title,
    /// Legacy typed blocks selected by the row's `type` column.
    Blocks,
}

impl PartKind {
    pub fn is_single_value(self) -> bool {
        matches!(self, PartKind::Single | PartKind::Title)
    }
}

fn default_true() -> bool {
    true
}

/// A declared content region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartSpec {
    pub name: String,
    /// Placeholder name in the template; defaults to `name`.
    #[serde(default)]
    pub placeholder: Option<String>,
    pub kind: PartKind,
    /// A required part must have at least one item.
    #[serde(default = "default_true")]
    pub required: bool,
    /// Shorter list items are skipped.
    #[serde(default)]
    pub min_chars: usize,
}

impl PartSpec {
    pub fn new(name: &str, kind: PartKind) -> Self {
        PartSpec {
            name: name.to_owned(),
            placeholder: None,
            kind,
            required: true,
            min_chars: 0,
        }
    }

    pub fn placeholder(&self) -> &str {
        self.placeholder.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentSchema {
    /// Reject extra rows for single-value parts instead of ignoring them.
    #[serde(default)]
    pub strict_single: bool,
    #[serde(default)]
    pub parts: Vec<PartSpec>,
}

impl ContentSchema {
    pub fn new(parts: Vec<PartSpec>) -> Self {
        ContentSchema {
            strict_single: false,
            parts,
        }
    }

    pub fn part(&self, name: &str) -> Option<&PartSpec> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// Placeholders every template rendered with this schema must contain.
    pub fn placeholders(&self) -> Vec<&str> {
        self.parts.iter().map(PartSpec::placeholder).collect()
    }

    /// Part names and placeholders must be unique and non-empty.
    pub fn validate(&self) -> Result<(), ContentError> {
        let mut names = BTreeSet::new();
        let mut placeholders = BTreeSet::new();
        for part in &self.parts {
            if part.name.is_empty() || part.placeholder().is_empty() {
                return Err(ContentError::InvalidSchema(
                    "part name and placeholder must not be empty".to_owned(),
                ));
            }
            if !is_placeholder_name(part.placeholder()) {
                return Err(ContentError::InvalidSchema(format!(
                    "placeholder '{}' may only contain letters, digits, '_', '.' and '-'",
                    part.placeholder()
                )));
            }
            if !names.insert(part.name.as_str()) {
                return Err(ContentError::InvalidSchema(format!(
                    "part '{}' declared twice",
                    part.name
                )));
            }
            if !placeholders.insert(part.placeholder()) {
                return Err(ContentError::InvalidSchema(format!(
                    "placeholder '{}' used by more than one part",
                    part.placeholder()
                )));
            }
        }
        Ok(())
    }
}
