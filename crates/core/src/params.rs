//! Parameter rows: `key,value,unit,comment` records.

use crate::error::CompileError;
use crate::source::Table;
use std::path::Path;

/// Columns every parameter source must declare.
pub const PARAMETER_COLUMNS: [&str; 4] = ["key", "value", "unit", "comment"];

/// One row of the parameter source.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterRow {
    /// A definition to compile into a symbol.
    Entry {
        key: String,
        value: String,
        unit: String,
        comment: String,
        line: usize,
    },
    /// Comment-only row kept for readability; never compiled.
    Separator { comment: String, line: usize },
}

impl ParameterRow {
    pub fn entry(key: &str, value: &str, unit: &str, comment: &str, line: usize) -> Self {
        ParameterRow::Entry {
            key: key.to_owned(),
            value: value.to_owned(),
            unit: unit.to_owned(),
            comment: comment.to_owned(),
            line,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            ParameterRow::Entry { line, .. } | ParameterRow::Separator { line, .. } => *line,
        }
    }
}

/// Interpret a loaded table as parameter rows.
///
/// Fully blank rows are dropped. Rows with only a comment become separators.
pub fn parameter_rows(table: &Table) -> Vec<ParameterRow> {
    let mut rows = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let key = row.get("key");
        let value = row.get("value");
        let unit = row.get("unit");
        let comment = row.get("comment");

        if key.is_empty() && value.is_empty() && unit.is_empty() {
            if !comment.is_empty() {
                rows.push(ParameterRow::Separator {
                    comment: comment.to_owned(),
                    line: row.line,
                });
            }
            continue;
        }
        rows.push(ParameterRow::entry(key, value, unit, comment, row.line));
    }
    rows
}

/// Load parameter rows from CSV bytes.
pub fn parse_parameters(origin: &str, bytes: &[u8]) -> Result<Vec<ParameterRow>, CompileError> {
    let table = Table::parse(origin, bytes, &PARAMETER_COLUMNS)?;
    Ok(parameter_rows(&table))
}

/// Load parameter rows from a CSV file.
pub fn load_parameters(path: &Path) -> Result<Vec<ParameterRow>, CompileError> {
    let table = Table::read(path, &PARAMETER_COLUMNS)?;
    Ok(parameter_rows(&table))
}
