//! The compiled symbol table.

use crate::diagnostic::Diagnostic;
use crate::group::Group;
use crate::unit::Unit;
use serde::Serialize;
use std::collections::BTreeMap;

/// A compiled parameter. Immutable once the table is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Symbol {
    pub key: String,
    /// Value with the unit suffix applied (raw units verbatim).
    pub value: String,
    #[serde(skip)]
    pub unit: Unit,
    pub group: Group,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
    /// Separator comments that preceded this row in the source.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    pub line: usize,
}

/// Mapping from key to compiled symbol, plus the hygiene warnings raised
/// while compiling it.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: BTreeMap<String, Symbol>,
    warnings: Vec<Diagnostic>,
}

impl SymbolTable {
    pub(crate) fn new(symbols: BTreeMap<String, Symbol>, warnings: Vec<Diagnostic>) -> Self {
        SymbolTable { symbols, warnings }
    }

    pub fn get(&self, key: &str) -> Option<&Symbol> {
        self.symbols.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.symbols.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Defined keys in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.symbols.keys().map(String::as_str)
    }

    /// Symbols in emission order: `(group, key)`.
    pub fn ordered(&self) -> Vec<&Symbol> {
        let mut out: Vec<&Symbol> = self.symbols.values().collect();
        out.sort_by(|a, b| (a.group, &a.key).cmp(&(b.group, &b.key)));
        out
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }
}
