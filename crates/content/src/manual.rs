//! Multi-page manuals: an outline table selects and orders sections, each
//! section becomes a titled page of typed blocks, and an index page links
//! them through a `toctree`.

use crate::error::ContentError;
use crate::inject::is_placeholder_name;
use crate::markup::{self, Node};
use crate::row::ContentRow;
use crate::schema::{ContentSchema, PartKind, PartSpec};
use crate::tree::build;
use hbpress_core::{CompileError, Diagnostic, Table};
use std::collections::BTreeMap;
use std::path::Path;

/// One included row of the outline table.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    pub section_id: String,
    pub title: String,
    pub line: usize,
}

/// A rendered section page.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualPage {
    pub section_id: String,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct Manual {
    pub pages: Vec<ManualPage>,
    /// Index document with a `toctree` over every page.
    pub index: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Interpret a loaded table as outline entries, included rows only, stably
/// sorted by `order` when that column is present.
///
/// Section ids name output files, so they share the placeholder grammar and
/// must be unique.
pub fn outline_entries(table: &Table) -> Result<Vec<OutlineEntry>, ContentError> {
    let ordered = table.has_column("order");
    let mut entries: Vec<(Option<i64>, OutlineEntry)> = Vec::new();
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();

    for row in &table.rows {
        if row.is_blank() {
            continue;
        }
        let include = row.get("include");
        if !include.is_empty() && include != "1" {
            continue;
        }
        let bad = |message: String| -> ContentError {
            CompileError::malformed(&table.origin, format!("line {}: {}", row.line, message)).into()
        };

        let section_id = row.get("section_id");
        if !is_placeholder_name(section_id) || section_id.starts_with('.') {
            return Err(bad(format!("invalid section id '{}'", section_id)));
        }
        if let Some(first) = seen.insert(section_id.to_owned(), row.line) {
            return Err(bad(format!(
                "duplicate section '{}' (first listed at line {})",
                section_id, first
            )));
        }
        let title = markup::single_line(row.get("title"));
        if title.is_empty() {
            return Err(bad(format!("section '{}' has no title", section_id)));
        }
        let order = if ordered {
            let raw = row.get("order");
            Some(
                raw.parse::<i64>()
                    .map_err(|_| bad(format!("invalid order '{}'", raw)))?,
            )
        } else {
            None
        };
        entries.push((
            order,
            OutlineEntry {
                section_id: section_id.to_owned(),
                title,
                line: row.line,
            },
        ));
    }

    entries.sort_by_key(|(order, _)| *order);
    Ok(entries.into_iter().map(|(_, e)| e).collect())
}

pub fn load_outline(path: &Path) -> Result<Vec<OutlineEntry>, ContentError> {
    let table = Table::read(path, &["section_id", "title"])?;
    outline_entries(&table)
}

/// Render one page per outline entry from `rows` (typed blocks keyed by
/// section id), plus the index page titled `title` that lists the pages
/// under `sections_dir`.
///
/// A section without blocks renders as its title alone. Block rows for
/// sections missing from the outline are dropped.
pub fn render_manual(
    outline: &[OutlineEntry],
    rows: &[ContentRow],
    title: &str,
    sections_dir: &str,
) -> Result<Manual, ContentError> {
    let schema = ContentSchema::new(
        outline
            .iter()
            .map(|entry| PartSpec {
                required: false,
                ..PartSpec::new(&entry.section_id, PartKind::Blocks)
            })
            .collect(),
    );
    let listed: Vec<ContentRow> = rows
        .iter()
        .filter(|row| {
            let known = schema.part(&row.part).is_some();
            if !known {
                log::debug!("line {}: section '{}' is not in the outline", row.line, row.part);
            }
            known
        })
        .cloned()
        .collect();
    let tree = build(&listed, &schema)?;

    let pages = outline
        .iter()
        .map(|entry| {
            let heading = Node::Title(entry.title.clone()).render();
            let body = tree.render_part(&entry.section_id);
            let text = if body.is_empty() {
                format!("{}\n", heading)
            } else {
                format!("{}\n\n{}\n", heading, body)
            };
            ManualPage {
                section_id: entry.section_id.clone(),
                text,
            }
        })
        .collect::<Vec<_>>();

    let mut index = format!(
        "{}\n\n.. toctree::\n   :maxdepth: 2\n\n",
        Node::Title(markup::single_line(title)).render()
    );
    for page in &pages {
        index.push_str(&format!("   {}/{}\n", sections_dir, page.section_id));
    }

    Ok(Manual {
        pages,
        index,
        diagnostics: tree.diagnostics().to_vec(),
    })
}
