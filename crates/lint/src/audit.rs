//! Hard-coded length audit: literal `mm`/`pt`/`em` lengths left in
//! template or generated TeX that bypass the parameter table.
//!
//! Informational only; hits never fail a run.

use crate::corpus::TemplateCorpus;
use crate::error::LintError;
use crate::tokenizer::compile_pattern;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static LENGTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^A-Za-z])(\d+(?:\.\d+)?)(mm|pt|em)\b").unwrap());

/// Lines matching any of these are already parameterized.
pub const DEFAULT_AUDIT_IGNORE: [&str; 2] = [r"\\csname\s+HB", r"HB[0-9A-Za-z_]+"];

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct AuditHit {
    pub file: String,
    pub line: usize,
    pub value: String,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct Auditor {
    ignore: Vec<Regex>,
}

impl Auditor {
    /// Auditor with the default ignore list plus `extra` patterns.
    pub fn new<S: AsRef<str>>(extra: &[S]) -> Result<Self, LintError> {
        let ignore = DEFAULT_AUDIT_IGNORE
            .iter()
            .copied()
            .chain(extra.iter().map(|s| s.as_ref()))
            .map(compile_pattern)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Auditor { ignore })
    }

    /// All literal lengths in the corpus, sorted by file and line.
    pub fn audit(&self, corpus: &TemplateCorpus) -> Vec<AuditHit> {
        let mut hits = Vec::new();
        for file in corpus.files() {
            let name = file.path.display().to_string();
            for (index, line) in file.text.lines().enumerate() {
                if self.ignore.iter().any(|re| re.is_match(line)) {
                    continue;
                }
                for caps in LENGTH.captures_iter(line) {
                    hits.push(AuditHit {
                        file: name.clone(),
                        line: index + 1,
                        value: format!("{}{}", &caps[1], &caps[2]),
                        text: line.trim().to_owned(),
                    });
                }
            }
        }
        hits.sort();
        hits
    }
}
