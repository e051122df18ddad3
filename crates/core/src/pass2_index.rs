//! Pass 2: key uniqueness and grouping -- build the symbol table.

use crate::diagnostic::Diagnostic;
use crate::error::CompileError;
use crate::group::Group;
use crate::pass1_validate::ValidatedRow;
use crate::symbols::{Symbol, SymbolTable};
use std::collections::BTreeMap;

pub fn build_table(
    rows: Vec<ValidatedRow>,
    warnings: Vec<Diagnostic>,
) -> Result<SymbolTable, CompileError> {
    let mut symbols: BTreeMap<String, Symbol> = BTreeMap::new();

    for row in rows {
        if let Some(first) = symbols.get(&row.key) {
            return Err(CompileError::DuplicateKey {
                key: row.key,
                line: row.line,
                first_line: first.line,
            });
        }
        let group = Group::of_key(&row.key);
        symbols.insert(
            row.key.clone(),
            Symbol {
                key: row.key,
                value: row.value,
                unit: row.unit,
                group,
                comment: row.comment,
                notes: row.notes,
                line: row.line,
            },
        );
    }

    Ok(SymbolTable::new(symbols, warnings))
}
