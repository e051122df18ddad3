#![allow(clippy::result_large_err)]
//! hbpress-core: parameter symbol compiler.
//!
//! Lowers a flat `key,value,unit,comment` table into a grouped, typed symbol
//! table and renders it as TeX control-sequence definitions.
//!
//! # Public API
//!
//! - [`Table`] -- the shared Row Loader for tabular sources
//! - [`compile()`] -- run both compiler passes over parameter rows
//! - [`AliasMap`] / [`resolve()`] -- legacy-to-canonical forwarding edges
//! - [`render_symbols()`] -- emit the symbol artifact
//! - [`CompileError`] / [`Diagnostic`] -- fatal errors and hygiene warnings

pub mod alias;
pub mod artifact;
pub mod compile;
pub mod diagnostic;
pub mod error;
pub mod group;
pub mod params;
pub mod pass1_validate;
pub mod pass2_index;
pub mod source;
pub mod symbols;
pub mod unit;

// ── Convenience re-exports: key types ────────────────────────────────

pub use alias::{AliasEdge, AliasMap};
pub use diagnostic::{Diagnostic, Severity};
pub use error::{CompileError, ValueShape};
pub use group::Group;
pub use params::ParameterRow;
pub use source::{Row, Table};
pub use symbols::{Symbol, SymbolTable};
pub use unit::Unit;

// ── Convenience re-exports: pipeline entry points ────────────────────

pub use alias::resolve;
pub use artifact::{render_symbols, symbol_reference, SYMBOL_PREFIX};
pub use compile::compile;
pub use params::{load_parameters, parse_parameters};
