//! LintReport -- the outcome of a cross-reference scan.

use hbpress_core::Diagnostic;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Where a key is read.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Location {
    pub file: String,
    pub line: usize,
}

/// Definitions diffed against template references.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LintReport {
    pub files_scanned: usize,
    pub defined_count: usize,
    /// Every referenced key with the places it is read.
    pub references: BTreeMap<String, Vec<Location>>,
    /// Referenced but not defined. Non-empty means the lint fails.
    pub missing: BTreeSet<String>,
    /// Defined but never referenced. Warning only.
    pub unused: BTreeSet<String>,
    pub findings: Vec<Diagnostic>,
}

impl LintReport {
    pub fn passed(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.findings.iter().filter(|d| d.is_warning())
    }

    /// First location a key is read from, for diagnostics.
    pub fn first_use(&self, key: &str) -> Option<&Location> {
        self.references.get(key).and_then(|locs| locs.first())
    }
}
