//! hbpress-lint: static cross-reference checks between the compiled symbol
//! table and the template corpus that reads it.
//!
//! The linter consumes a compiled [`hbpress_core::SymbolTable`], never the
//! raw CSV. [`lint()`] is the pre-flight gate (missing keys fail, unused keys
//! warn); [`Auditor`] reports literal lengths that bypass the table.

pub mod audit;
pub mod corpus;
pub mod error;
pub mod report;
pub mod tokenizer;
pub mod xref;

pub use audit::{AuditHit, Auditor};
pub use corpus::{TemplateCorpus, TemplateFile};
pub use error::LintError;
pub use report::{LintReport, Location};
pub use tokenizer::{
    PatternTokenizer, Reference, ReferenceTokenizer, DEFAULT_IGNORE_PATTERNS,
    DEFAULT_REFERENCE_PATTERN,
};
pub use xref::{analyze, diff, lint};
