//! Content Tree Builder: groups rows by part and lowers each into blocks.

use crate::error::ContentError;
use crate::markup::{self, Node};
use crate::row::ContentRow;
use crate::schema::{ContentSchema, PartKind};
use hbpress_core::Diagnostic;

/// Kind tag of a rendered block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Item,
    Single,
    Title,
    Paragraph,
    UpsLayout,
    AdmonitionList,
    HighlightBar,
    WarrantyBlock,
    WarrantyYears,
}

impl BlockKind {
    /// Legacy `type` column values; anything else renders as a paragraph.
    pub fn from_type(kind: &str) -> BlockKind {
        match kind {
            "ups_layout" => BlockKind::UpsLayout,
            "admonition_list" => BlockKind::AdmonitionList,
            "highlight_bar" => BlockKind::HighlightBar,
            "warranty_block" => BlockKind::WarrantyBlock,
            "warranty_years" => BlockKind::WarrantyYears,
            _ => BlockKind::Paragraph,
        }
    }
}

/// One rendered fragment, tagged with the part it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentBlock {
    pub part: String,
    pub kind: BlockKind,
    pub node: Node,
    pub line: usize,
}

impl ContentBlock {
    pub fn render(&self) -> String {
        self.node.render()
    }
}

/// Blocks grouped by part, parts in first-occurrence order.
#[derive(Debug, Clone, Default)]
pub struct ContentTree {
    parts: Vec<(String, Vec<ContentBlock>)>,
    diagnostics: Vec<Diagnostic>,
}

impl ContentTree {
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|(name, _)| name.as_str())
    }

    pub fn blocks(&self, part: &str) -> &[ContentBlock] {
        self.parts
            .iter()
            .find(|(name, _)| name == part)
            .map(|(_, blocks)| blocks.as_slice())
            .unwrap_or(&[])
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Render a part's blocks to one markup fragment. List items are joined
    /// line by line (a blank line follows any item with a nested list);
    /// other blocks are separated by blank lines.
    pub fn render_part(&self, part: &str) -> String {
        let blocks = self.blocks(part);
        let mut out = String::new();
        for (i, block) in blocks.iter().enumerate() {
            if i > 0 {
                let prev = &blocks[i - 1];
                let tight = prev.kind == BlockKind::Item
                    && block.kind == BlockKind::Item
                    && !prev.node.has_nested_list();
                out.push_str(if tight { "\n" } else { "\n\n" });
            }
            out.push_str(&block.render());
        }
        out
    }

    fn push(&mut self, block: ContentBlock) {
        match self.parts.iter_mut().find(|(name, _)| *name == block.part) {
            Some((_, blocks)) => blocks.push(block),
            None => self.parts.push((block.part.clone(), vec![block])),
        }
    }
}

/// Build the content tree for `rows` under `schema`.
///
/// Rows keep input order within a part. Required parts with no contributing
/// rows fail with [`ContentError::EmptyPart`].
pub fn build(rows: &[ContentRow], schema: &ContentSchema) -> Result<ContentTree, ContentError> {
    schema.validate()?;
    let mut tree = ContentTree::default();

    for row in rows {
        let spec = schema.part(&row.part);
        let typed = spec.is_some_and(|s| s.kind == PartKind::Blocks);
        // Typed blocks may carry their content in the param columns alone.
        if row.text.is_empty() && !(typed && row.params.iter().any(|p| !p.is_empty())) {
            continue;
        }
        let Some(spec) = spec else {
            tree.push(paragraph(row));
            continue;
        };

        match spec.kind {
            PartKind::List => {
                let length = markup::sanitize(&row.text).chars().count();
                if length < spec.min_chars {
                    tree.diagnostics.push(
                        Diagnostic::info(
                            "short-item-skipped",
                            format!(
                                "item in part '{}' shorter than {} characters skipped",
                                row.part, spec.min_chars
                            ),
                        )
                        .at_line(row.line),
                    );
                    continue;
                }
                tree.push(ContentBlock {
                    part: row.part.clone(),
                    kind: BlockKind::Item,
                    node: Node::bullet(&row.text),
                    line: row.line,
                });
            }
            PartKind::Single | PartKind::Title => {
                if let Some(first_line) = tree.blocks(&row.part).first().map(|b| b.line) {
                    if schema.strict_single {
                        return Err(ContentError::MultipleCandidates {
                            part: row.part.clone(),
                            line: row.line,
                            first_line,
                        });
                    }
                    tree.diagnostics.push(
                        Diagnostic::warning(
                            "ignored-single-value",
                            format!(
                                "part '{}' takes one value; keeping line {}, ignoring this row",
                                row.part, first_line
                            ),
                        )
                        .at_line(row.line),
                    );
                    continue;
                }
                let text = markup::sanitize(&row.text);
                let (kind, node) = if spec.kind == PartKind::Title {
                    (BlockKind::Title, Node::Title(markup::single_line(&text)))
                } else {
                    (BlockKind::Single, Node::Text(markup::expand_line_breaks(&text)))
                };
                tree.push(ContentBlock {
                    part: row.part.clone(),
                    kind,
                    node,
                    line: row.line,
                });
            }
            PartKind::Blocks => tree.push(typed_block(row)),
        }
    }

    for spec in &schema.parts {
        if spec.required && tree.blocks(&spec.name).is_empty() {
            return Err(ContentError::EmptyPart {
                part: spec.name.clone(),
            });
        }
    }

    Ok(tree)
}

fn paragraph(row: &ContentRow) -> ContentBlock {
    ContentBlock {
        part: row.part.clone(),
        kind: BlockKind::Paragraph,
        node: Node::Paragraph(row.text.clone()),
        line: row.line,
    }
}

fn typed_block(row: &ContentRow) -> ContentBlock {
    use markup::{escape_latex as esc, latex_lines};

    let kind = BlockKind::from_type(&row.kind);
    let (command, args) = match kind {
        BlockKind::UpsLayout => (
            "hbUPSLayout",
            vec![esc(&row.text), esc(row.param(0)), latex_lines(row.param(1))],
        ),
        BlockKind::AdmonitionList => {
            let label = match row.param(0) {
                "" => "CAUTION",
                label => label,
            };
            let items: String = row
                .text
                .split(';')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|item| format!("\\item {} ", esc(item)))
                .collect();
            ("hbAdmonitionList", vec![esc(label), items])
        }
        BlockKind::HighlightBar => ("hbHighlightBar", vec![esc(&row.text)]),
        BlockKind::WarrantyBlock => (
            "hbWarrantyBlock",
            vec![esc(&row.text), latex_lines(row.param(0))],
        ),
        BlockKind::WarrantyYears => (
            "hbWarrantyYears",
            vec![
                esc(&row.text),
                esc(row.param(0)),
                esc(row.param(1)),
                esc(row.param(2)),
            ],
        ),
        _ => return paragraph(row),
    };
    ContentBlock {
        part: row.part.clone(),
        kind,
        node: Node::Directive {
            command: command.to_owned(),
            args,
        },
        line: row.line,
    }
}
