//! Reference tokenizers: the pluggable grammar that finds symbol reads in
//! template text.
//!
//! The cross-reference diff only sees [`Reference`] values, so swapping the
//! templating system means supplying another [`ReferenceTokenizer`].

use crate::error::LintError;
use regex::Regex;
use std::ops::Range;

/// Default reference shape: `\csname HB<key>\endcsname`.
pub const DEFAULT_REFERENCE_PATTERN: &str = r"\\csname\s+HB([A-Za-z0-9_]+)\\endcsname";

/// Default ignore shapes: debugging aids that print a parameter without
/// reading it for layout.
pub const DEFAULT_IGNORE_PATTERNS: [&str; 2] = [r"\\typeout\{[^{}]*\}", r"\\message\{[^{}]*\}"];

/// A symbol read found in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub key: String,
    /// 1-based line of the reference.
    pub line: usize,
}

pub trait ReferenceTokenizer {
    /// All symbol references in `text`, in order of appearance.
    fn references(&self, text: &str) -> Vec<Reference>;
}

/// Regex-driven tokenizer. The reference pattern's first capture group is
/// the key; matches overlapping any ignore pattern are not references.
#[derive(Debug, Clone)]
pub struct PatternTokenizer {
    reference: Regex,
    ignore: Vec<Regex>,
}

impl PatternTokenizer {
    pub fn new<S: AsRef<str>>(reference: &str, ignore: &[S]) -> Result<Self, LintError> {
        let reference_re = compile_pattern(reference)?;
        if reference_re.captures_len() < 2 {
            return Err(LintError::InvalidPattern {
                pattern: reference.to_owned(),
                message: "reference pattern needs a capture group for the key".to_owned(),
            });
        }
        let ignore = ignore
            .iter()
            .map(|p| compile_pattern(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PatternTokenizer {
            reference: reference_re,
            ignore,
        })
    }

    /// `\csname HB<key>\endcsname` with the default ignore list.
    pub fn csname() -> Self {
        PatternTokenizer {
            reference: Regex::new(DEFAULT_REFERENCE_PATTERN).unwrap(),
            ignore: DEFAULT_IGNORE_PATTERNS
                .iter()
                .map(|p| Regex::new(p).unwrap())
                .collect(),
        }
    }

    fn ignored_spans(&self, text: &str) -> Vec<Range<usize>> {
        self.ignore
            .iter()
            .flat_map(|re| re.find_iter(text).map(|m| m.range()))
            .collect()
    }
}

impl Default for PatternTokenizer {
    fn default() -> Self {
        PatternTokenizer::csname()
    }
}

impl ReferenceTokenizer for PatternTokenizer {
    fn references(&self, text: &str) -> Vec<Reference> {
        let ignored = self.ignored_spans(text);
        let mut refs = Vec::new();
        for caps in self.reference.captures_iter(text) {
            let (Some(whole), Some(key)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let span = whole.range();
            if ignored
                .iter()
                .any(|ig| ig.start < span.end && span.start < ig.end)
            {
                continue;
            }
            refs.push(Reference {
                key: key.as_str().to_owned(),
                line: line_of(text, span.start),
            });
        }
        refs
    }
}

pub(crate) fn compile_pattern(pattern: &str) -> Result<Regex, LintError> {
    Regex::new(pattern).map_err(|e| LintError::InvalidPattern {
        pattern: pattern.to_owned(),
        message: e.to_string(),
    })
}

fn line_of(text: &str, offset: usize) -> usize {
    text.as_bytes()[..offset].iter().filter(|&&b| b == b'\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(refs: &[Reference]) -> Vec<&str> {
        refs.iter().map(|r| r.key.as_str()).collect()
    }

    #[test]
    fn finds_csname_references_with_lines() {
        let text = "a=\\csname HBpage_width\\endcsname\n\nb=\\csname  HBtype_x\\endcsname";
        let refs = PatternTokenizer::csname().references(text);
        assert_eq!(
            refs,
            vec![
                Reference {
                    key: "page_width".into(),
                    line: 1
                },
                Reference {
                    key: "type_x".into(),
                    line: 3
                },
            ]
        );
    }

    #[test]
    fn bare_macro_names_are_not_references() {
        let refs = PatternTokenizer::csname().references("\\HBpage_width and HBtype_x");
        assert!(refs.is_empty());
    }

    #[test]
    fn debugging_aids_are_ignored() {
        let text = "\\typeout{\\csname HBdebug\\endcsname}\\csname HBpage_a\\endcsname";
        let refs = PatternTokenizer::csname().references(text);
        assert_eq!(keys(&refs), vec!["page_a"]);
    }

    #[test]
    fn custom_reference_grammar() {
        let tok = PatternTokenizer::new(r"\\hbparam\{([a-z_]+)\}", &[r"%.*"]).unwrap();
        let refs = tok.references("\\hbparam{page_a} % \\hbparam{old}\n\\hbparam{comp_b}");
        assert_eq!(keys(&refs), vec!["page_a", "comp_b"]);
    }

    #[test]
    fn pattern_without_group_is_rejected() {
        let err = PatternTokenizer::new(r"HB[a-z]+", &[] as &[&str]).unwrap_err();
        assert!(matches!(err, LintError::InvalidPattern { .. }));
    }

    #[test]
    fn invalid_regex_is_rejected() {
        let err = PatternTokenizer::new(DEFAULT_REFERENCE_PATTERN, &["(unclosed"]).unwrap_err();
        assert!(err.to_string().contains("(unclosed"));
    }
}
