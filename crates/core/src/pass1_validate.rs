//! Pass 1: validate every row and format its value.
//!
//! Any failure aborts the whole compilation; nothing is emitted for a
//! table that does not fully validate.

use crate::diagnostic::Diagnostic;
use crate::error::CompileError;
use crate::group::Group;
use crate::params::ParameterRow;
use crate::unit::Unit;

/// A row that passed validation, with its value already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRow {
    pub key: String,
    pub value: String,
    pub unit: Unit,
    pub comment: String,
    pub notes: Vec<String>,
    pub line: usize,
}

pub fn validate(
    rows: &[ParameterRow],
) -> Result<(Vec<ValidatedRow>, Vec<Diagnostic>), CompileError> {
    let mut validated = Vec::new();
    let mut warnings = Vec::new();
    let mut pending_notes: Vec<String> = Vec::new();

    for row in rows {
        let (key, value, unit, comment, line) = match row {
            ParameterRow::Separator { comment, .. } => {
                pending_notes.push(comment.clone());
                continue;
            }
            ParameterRow::Entry {
                key,
                value,
                unit,
                comment,
                line,
            } => (key, value, unit, comment, *line),
        };

        if key.is_empty() {
            return Err(CompileError::EmptyKey { line });
        }

        let parsed = Unit::parse(unit).ok_or_else(|| CompileError::InvalidUnit {
            key: key.clone(),
            unit: unit.clone(),
            line,
            allowed: Unit::allowed_list(),
        })?;

        if value.is_empty() {
            return Err(CompileError::EmptyValue {
                key: key.clone(),
                line,
            });
        }

        parsed
            .check(key, value)
            .map_err(|shape| CompileError::InvalidValue {
                key: key.clone(),
                value: value.clone(),
                shape,
                line,
            })?;

        warnings.extend(hygiene_warnings(key, value, line));

        validated.push(ValidatedRow {
            key: key.clone(),
            value: parsed.format(value),
            unit: parsed,
            comment: comment.clone(),
            notes: std::mem::take(&mut pending_notes),
            line,
        });
    }

    Ok((validated, warnings))
}

fn hygiene_warnings(key: &str, value: &str, line: usize) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    if Group::of_key(key) == Group::Other {
        out.push(
            Diagnostic::warning(
                "naming-convention",
                format!(
                    "non-conventional key naming: '{}' (expected page_/brand_color_/type_/comp_ or section_after_fix)",
                    key
                ),
            )
            .with_key(key)
            .at_line(line),
        );
    }
    if key.ends_with("bullet_symbol") && value.contains("\\\\") {
        out.push(
            Diagnostic::warning(
                "bullet-double-backslash",
                format!(
                    "'{}' contains a double backslash; use single backslashes for TeX commands: '{}'",
                    key, value
                ),
            )
            .with_key(key)
            .at_line(line),
        );
    }
    out
}
