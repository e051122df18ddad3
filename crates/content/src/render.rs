//! One content job end to end: rows -> tree -> injected document.

use crate::error::ContentError;
use crate::inject::inject;
use crate::row::ContentRow;
use crate::schema::ContentSchema;
use crate::tree::{build, ContentTree};
use hbpress_core::Diagnostic;
use std::collections::BTreeMap;

/// A rendered content artifact plus the diagnostics gathered on the way.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Map each declared part's rendered fragment to its placeholder name.
pub fn placeholder_blocks(tree: &ContentTree, schema: &ContentSchema) -> BTreeMap<String, String> {
    schema
        .parts
        .iter()
        .map(|part| (part.placeholder().to_owned(), tree.render_part(&part.name)))
        .collect()
}

/// Build the content tree for `rows` and inject it into `template`.
pub fn render_document(
    rows: &[ContentRow],
    template: &str,
    schema: &ContentSchema,
) -> Result<RenderedDocument, ContentError> {
    let tree = build(rows, schema)?;
    for name in tree.part_names() {
        if schema.part(name).is_none() {
            log::info!("part '{}' is not declared; its rows are not injected", name);
        }
    }
    let text = inject(template, &placeholder_blocks(&tree, schema))?;
    Ok(RenderedDocument {
        text,
        diagnostics: tree.diagnostics().to_vec(),
    })
}
