//! Row Loader: tabular sources into ordered, normalized rows.
//!
//! Both the parameter compiler and the content renderer read CSV through
//! [`Table`]. Loading is a pure read: the file is opened, decoded and closed
//! before any row is interpreted.

use crate::error::CompileError;
use csv::{ReaderBuilder, Trim};
use std::collections::HashMap;
use std::path::Path;

const BOM: char = '\u{feff}';

/// One data row of a tabular source.
///
/// Cells are trimmed; columns absent from a short record read as `""`.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// 1-based line in the source (the header is line 1).
    pub line: usize,
    cells: HashMap<String, String>,
}

impl Row {
    /// Cell value for `column`, or `""` when the column or cell is absent.
    pub fn get(&self, column: &str) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn is_blank(&self) -> bool {
        self.cells.values().all(|v| v.is_empty())
    }
}

/// A parsed tabular source: header plus rows in input order.
#[derive(Debug, Clone)]
pub struct Table {
    pub origin: String,
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Read and parse the file at `path`, requiring every column in `required`.
    pub fn read(path: &Path, required: &[&str]) -> Result<Table, CompileError> {
        let origin = path.display().to_string();
        let bytes = std::fs::read(path).map_err(|e| CompileError::Unreadable {
            origin: origin.clone(),
            message: e.to_string(),
        })?;
        Table::parse(&origin, &bytes, required)
    }

    /// Parse CSV bytes. `origin` names the source in diagnostics.
    pub fn parse(origin: &str, bytes: &[u8], required: &[&str]) -> Result<Table, CompileError> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            CompileError::malformed(origin, format!("source is not valid UTF-8 ({})", e))
        })?;
        let text = text.strip_prefix(BOM).unwrap_or(text);

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| CompileError::malformed(origin, format!("cannot read header: {}", e)))?
            .iter()
            .map(|h| h.trim().to_owned())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(CompileError::malformed(origin, "no header row"));
        }
        for column in required {
            if !headers.iter().any(|h| h == column) {
                return Err(CompileError::malformed(
                    origin,
                    format!("missing required column: {}", column),
                ));
            }
        }

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                CompileError::malformed(origin, format!("row {}: {}", index + 2, e))
            })?;
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(index + 2);
            let cells = headers
                .iter()
                .enumerate()
                .filter(|(_, h)| !h.is_empty())
                .map(|(i, h)| (h.clone(), record.get(i).unwrap_or("").trim().to_owned()))
                .collect();
            rows.push(Row { line, cells });
        }

        log::debug!("{}: loaded {} rows", origin, rows.len());
        Ok(Table {
            origin: origin.to_owned(),
            headers,
            rows,
        })
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }
}
