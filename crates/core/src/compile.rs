//! Two-pass parameter compiler: validate-and-format, then uniqueness and
//! grouping.

use crate::error::CompileError;
use crate::params::ParameterRow;
use crate::pass1_validate;
use crate::pass2_index;
use crate::symbols::SymbolTable;

/// Compile parameter rows into a symbol table, or return the first
/// validation error encountered.
pub fn compile(rows: &[ParameterRow]) -> Result<SymbolTable, CompileError> {
    // Pass 1: per-row validation and value formatting
    let (validated, warnings) = pass1_validate::validate(rows)?;

    // Pass 2: uniqueness and grouping
    let table = pass2_index::build_table(validated, warnings)?;

    log::debug!(
        "compiled {} symbols ({} warnings)",
        table.len(),
        table.warnings().len()
    );
    Ok(table)
}
