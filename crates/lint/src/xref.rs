//! Cross-reference diff: symbol definitions against template reads.

use crate::corpus::TemplateCorpus;
use crate::error::LintError;
use crate::report::{LintReport, Location};
use crate::tokenizer::ReferenceTokenizer;
use hbpress_core::{Diagnostic, SymbolTable};
use std::collections::{BTreeMap, BTreeSet};

/// Split keys into `(missing, unused)`: referenced-but-undefined and
/// defined-but-unreferenced. Independent of any reference grammar.
pub fn diff<'a>(
    defined: &BTreeSet<&'a str>,
    referenced: &BTreeSet<&'a str>,
) -> (BTreeSet<String>, BTreeSet<String>) {
    let missing = referenced
        .difference(defined)
        .map(|k| (*k).to_owned())
        .collect();
    let unused = defined
        .difference(referenced)
        .map(|k| (*k).to_owned())
        .collect();
    (missing, unused)
}

/// Scan `corpus` with `tokenizer` and diff against `table`. Never fails;
/// see [`lint`] for the gating variant.
pub fn analyze<T>(table: &SymbolTable, corpus: &TemplateCorpus, tokenizer: &T) -> LintReport
where
    T: ReferenceTokenizer + ?Sized,
{
    let mut references: BTreeMap<String, Vec<Location>> = BTreeMap::new();
    for file in corpus.files() {
        let name = file.path.display().to_string();
        for r in tokenizer.references(&file.text) {
            references.entry(r.key).or_default().push(Location {
                file: name.clone(),
                line: r.line,
            });
        }
    }

    let defined: BTreeSet<&str> = table.keys().collect();
    let referenced: BTreeSet<&str> = references.keys().map(String::as_str).collect();
    let (missing, unused) = diff(&defined, &referenced);

    let mut findings: Vec<Diagnostic> = table.warnings().to_vec();
    for key in &unused {
        let mut d = Diagnostic::warning(
            "unused-key",
            format!("key '{}' is defined but not referenced in any template", key),
        )
        .with_key(key);
        if let Some(symbol) = table.get(key) {
            d = d.at_line(symbol.line);
        }
        findings.push(d);
    }

    log::debug!(
        "lint: {} files, {} referenced, {} missing, {} unused",
        corpus.len(),
        references.len(),
        missing.len(),
        unused.len()
    );

    LintReport {
        files_scanned: corpus.len(),
        defined_count: table.len(),
        references,
        missing,
        unused,
        findings,
    }
}

/// Pre-flight gate: fail with every missing key when templates read
/// undefined symbols; otherwise return the report (unused keys as warnings).
pub fn lint<T>(
    table: &SymbolTable,
    corpus: &TemplateCorpus,
    tokenizer: &T,
) -> Result<LintReport, LintError>
where
    T: ReferenceTokenizer + ?Sized,
{
    let report = analyze(table, corpus, tokenizer);
    if report.passed() {
        Ok(report)
    } else {
        Err(LintError::MissingKeys {
            keys: report.missing.iter().cloned().collect(),
        })
    }
}
