//! Document tree nodes and their reStructuredText / raw-LaTeX rendering.

/// Literal two-character line-break escape used inside CSV cells.
pub const LINE_BREAK_ESCAPE: &str = "\\n";

const NBSP: char = '\u{a0}';

/// A nested line under a bullet head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    /// Author-supplied `- ` marker: a nested bullet.
    Bullet(String),
    /// Plain line continuing the item body.
    Continuation(String),
}

/// A rendered unit of content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Bullet { head: String, children: Vec<Child> },
    Text(String),
    Title(String),
    Paragraph(String),
    /// `.. raw:: latex` directive invoking a theme macro.
    Directive { command: String, args: Vec<String> },
}

impl Node {
    /// Split `text` on the literal `\n` escape into a bullet head and
    /// nested lines.
    pub fn bullet(text: &str) -> Node {
        let mut segments = text.split(LINE_BREAK_ESCAPE);
        let head = sanitize(segments.next().unwrap_or(""));
        let children = segments
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_prefix("- ") {
                Some(rest) => Child::Bullet(sanitize(rest)),
                None => Child::Continuation(sanitize(s)),
            })
            .collect();
        Node::Bullet { head, children }
    }

    pub fn has_nested_list(&self) -> bool {
        match self {
            Node::Bullet { children, .. } => {
                children.iter().any(|c| matches!(c, Child::Bullet(_)))
            }
            _ => false,
        }
    }

    pub fn render(&self) -> String {
        match self {
            Node::Bullet { head, children } => render_bullet(head, children),
            Node::Text(text) | Node::Paragraph(text) => text.clone(),
            Node::Title(text) => {
                let underline = "=".repeat(text.chars().count());
                format!("{}\n{}", text, underline)
            }
            Node::Directive { command, args } => {
                let args: String = args.iter().map(|a| format!("{{{}}}", a)).collect();
                format!(".. raw:: latex\n\n   \\{}{}", command, args)
            }
        }
    }
}

fn render_bullet(head: &str, children: &[Child]) -> String {
    let mut lines = vec![format!("- {}", head)];
    let mut after_bullet = false;
    for child in children {
        match child {
            Child::Bullet(text) => {
                if !after_bullet {
                    lines.push(String::new());
                }
                lines.push(format!("  - {}", text));
                after_bullet = true;
            }
            Child::Continuation(text) => {
                if after_bullet {
                    lines.push(String::new());
                }
                lines.push(format!("  {}", text));
                after_bullet = false;
            }
        }
    }
    lines.join("\n")
}

/// Light cleanup for list text: non-breaking spaces become spaces, and a
/// leading directive or field marker is escaped so it stays literal.
pub fn sanitize(s: &str) -> String {
    let s = s.replace(NBSP, " ");
    let s = s.trim();
    if s.starts_with(".. ") || s.starts_with(':') {
        format!("\\ {}", s)
    } else {
        s.to_owned()
    }
}

/// Replace the literal `\n` escape with real line breaks.
pub fn expand_line_breaks(s: &str) -> String {
    s.replace(LINE_BREAK_ESCAPE, "\n")
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collapse `\n` escapes and real line breaks into single spaces, for
/// text that must stay on one line (section titles).
pub fn single_line(s: &str) -> String {
    expand_line_breaks(s)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Minimal escaping for raw LaTeX macro arguments.
pub fn escape_latex(s: &str) -> String {
    s.replace('\\', "\\textbackslash ")
        .replace('{', "\\{")
        .replace('}', "\\}")
}

/// Escape for LaTeX, turning `\n` escapes into `\\` line breaks.
pub fn latex_lines(s: &str) -> String {
    escape_latex(&s.replace(LINE_BREAK_ESCAPE, "\n")).replace('\n', "\\\\ ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_with_two_nested_bullets() {
        let node = Node::bullet("Head\\n- sub1\\n- sub2");
        assert_eq!(node.render(), "- Head\n\n  - sub1\n  - sub2");
        assert!(node.has_nested_list());
    }

    #[test]
    fn unmarked_lines_become_continuations() {
        let node = Node::bullet("Do not immerse\\nin water or other liquids");
        assert_eq!(node.render(), "- Do not immerse\n  in water or other liquids");
        assert!(!node.has_nested_list());
    }

    #[test]
    fn continuation_after_nested_list_is_separated() {
        let node = Node::bullet("Head\\n- a\\nTail");
        assert_eq!(node.render(), "- Head\n\n  - a\n\n  Tail");
    }

    #[test]
    fn empty_segments_are_dropped() {
        let node = Node::bullet("Head\\n\\n  \\n- a");
        assert_eq!(
            node,
            Node::Bullet {
                head: "Head".into(),
                children: vec![Child::Bullet("a".into())]
            }
        );
    }

    #[test]
    fn sanitize_escapes_directive_starts() {
        assert_eq!(sanitize(".. note:: x"), "\\ .. note:: x");
        assert_eq!(sanitize(":field: x"), "\\ :field: x");
        assert_eq!(sanitize("a\u{a0}b "), "a b");
    }

    #[test]
    fn latex_escaping() {
        assert_eq!(escape_latex("a{b}\\c"), "a\\{b\\}\\textbackslash c");
        assert_eq!(latex_lines("one\\ntwo"), "one\\\\ two");
    }

    #[test]
    fn single_line_joins_segments() {
        assert_eq!(single_line("Safety\\n  First \\n"), "Safety First");
    }

    #[test]
    fn title_is_underlined() {
        assert_eq!(Node::Title("Safety".into()).render(), "Safety\n======");
    }

    #[test]
    fn directive_rendering() {
        let node = Node::Directive {
            command: "hbHighlightBar".into(),
            args: vec!["Read first".into()],
        };
        assert_eq!(
            node.render(),
            ".. raw:: latex\n\n   \\hbHighlightBar{Read first}"
        );
    }
}
