//! Content rows: `part,text` records, plus the legacy typed-block columns
//! (`type`, `param1`..`param3`) and the optional `order`/`include` columns.

use crate::error::ContentError;
use hbpress_core::{CompileError, Table};
use std::path::Path;

/// One row of a content source.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentRow {
    pub part: String,
    /// Legacy block type (`type` column); empty when absent.
    pub kind: String,
    pub text: String,
    pub params: [String; 3],
    pub order: Option<i64>,
    pub line: usize,
}

impl ContentRow {
    pub fn new(part: &str, text: &str) -> Self {
        ContentRow {
            part: part.to_owned(),
            text: text.to_owned(),
            ..ContentRow::default()
        }
    }

    pub fn with_kind(mut self, kind: &str, params: [&str; 3]) -> Self {
        self.kind = kind.to_owned();
        self.params = params.map(str::to_owned);
        self
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    pub fn param(&self, index: usize) -> &str {
        self.params.get(index).map(String::as_str).unwrap_or("")
    }
}

/// Interpret a loaded table as content rows, in authoring order.
///
/// The part column is `part`, or legacy `section_id`. Rows whose `include`
/// cell is set to anything but `1` are filtered out. When an `order` column
/// is present the rows are stably sorted by it.
pub fn content_rows(table: &Table) -> Result<Vec<ContentRow>, ContentError> {
    let part_column = if table.has_column("part") {
        "part"
    } else if table.has_column("section_id") {
        "section_id"
    } else {
        return Err(CompileError::malformed(&table.origin, "missing required column: part").into());
    };
    let ordered = table.has_column("order");

    let mut rows = Vec::new();
    for row in &table.rows {
        if row.is_blank() {
            continue;
        }
        let include = row.get("include");
        if !include.is_empty() && include != "1" {
            log::debug!("{}:{}: row excluded", table.origin, row.line);
            continue;
        }
        let order = if ordered {
            let raw = row.get("order");
            let parsed = raw.parse::<i64>().map_err(|_| {
                CompileError::malformed(
                    &table.origin,
                    format!("line {}: invalid order '{}'", row.line, raw),
                )
            })?;
            Some(parsed)
        } else {
            None
        };
        rows.push(ContentRow {
            part: row.get(part_column).to_owned(),
            kind: row.get("type").to_owned(),
            text: row.get("text").to_owned(),
            params: [
                row.get("param1").to_owned(),
                row.get("param2").to_owned(),
                row.get("param3").to_owned(),
            ],
            order,
            line: row.line,
        });
    }

    if ordered {
        rows.sort_by_key(|r| r.order);
    }
    Ok(rows)
}

pub fn parse_content(origin: &str, bytes: &[u8]) -> Result<Vec<ContentRow>, ContentError> {
    let table = Table::parse(origin, bytes, &["text"])?;
    content_rows(&table)
}

pub fn load_content(path: &Path) -> Result<Vec<ContentRow>, ContentError> {
    let table = Table::read(path, &["text"])?;
    content_rows(&table)
}
