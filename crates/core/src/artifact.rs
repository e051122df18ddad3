//! Symbol artifact emission: TeX control-sequence definitions grouped under
//! banner comments, followed by the alias forwarding section.

use crate::alias::AliasEdge;
use crate::group::Group;
use crate::symbols::SymbolTable;

/// Namespace prefix of every emitted control sequence.
pub const SYMBOL_PREFIX: &str = "HB";

/// `\csname HB<key>\endcsname`
pub fn symbol_reference(key: &str) -> String {
    format!("\\csname {}{}\\endcsname", SYMBOL_PREFIX, key)
}

/// `\expandafter\def\csname HB<key>\endcsname{<body>}`
pub fn symbol_definition(key: &str, body: &str) -> String {
    format!(
        "\\expandafter\\def\\csname {}{}\\endcsname{{{}}}",
        SYMBOL_PREFIX, key, body
    )
}

/// Escape `%` so comment text cannot swallow the rest of a TeX line.
pub fn escape_comment(s: &str) -> String {
    s.replace('%', "\\%").trim().to_owned()
}

/// Render the full symbol artifact. Output is a pure function of the table
/// and edges, so repeated runs are byte-identical.
pub fn render_symbols(table: &SymbolTable, edges: &[AliasEdge], source_name: &str) -> String {
    let mut lines: Vec<String> = vec![
        "% AUTO-GENERATED. DO NOT EDIT BY HAND.".to_owned(),
        format!("% Source: {}", source_name),
        format!("% Access pattern: {}", symbol_reference("<key>")),
        String::new(),
    ];

    let mut current: Option<Group> = None;
    for symbol in table.ordered() {
        if current != Some(symbol.group) {
            current = Some(symbol.group);
            lines.push(format!("% ===== {} =====", symbol.group.banner()));
            lines.push(String::new());
        }
        for note in &symbol.notes {
            lines.push(format!("%% {}", escape_comment(note)));
        }
        let comment = escape_comment(&symbol.comment);
        if !comment.is_empty() {
            lines.push(format!("% {}", comment));
        }
        lines.push(symbol_definition(&symbol.key, &symbol.value));
        lines.push(String::new());
    }

    if !edges.is_empty() {
        lines.push("% ===== ALIASES =====".to_owned());
        lines.push(String::new());
        let mut current: Option<Group> = None;
        for edge in edges {
            if current != Some(edge.group()) {
                if current.is_some() {
                    lines.push(String::new());
                }
                current = Some(edge.group());
                lines.push(format!("% ----- {} -----", edge.group().banner()));
            }
            lines.push(symbol_definition(
                &edge.from_key,
                &symbol_reference(&edge.to_key),
            ));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
