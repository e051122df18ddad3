use std::fmt;

/// The value grammar a parameter failed to satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// Signed decimal number, e.g. `-1.5`, `.5`, `12.`.
    Number,
    /// Signed integer.
    Integer,
    /// Four whitespace-separated non-negative integers (x y w h).
    Viewport,
    /// Four comma-separated numbers (c,m,y,k).
    Cmyk,
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueShape::Number => write!(f, "a number"),
            ValueShape::Integer => write!(f, "an integer"),
            ValueShape::Viewport => write!(f, "4 non-negative integers (x y w h)"),
            ValueShape::Cmyk => write!(f, "4 numbers separated by commas (c,m,y,k)"),
        }
    }
}

/// A fatal error raised while loading or compiling a parameter table.
///
/// Every variant renders as a single line so the CLI can report it verbatim.
/// Line numbers refer to the tabular source, with the header on line 1.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CompileError {
    /// Header absent, required column missing, or undecodable input.
    #[error("{origin}: malformed source: {message}")]
    MalformedSource { origin: String, message: String },

    #[error("{origin}: cannot read source: {message}")]
    Unreadable { origin: String, message: String },

    #[error("line {line}: invalid unit '{unit}' for key '{key}' (allowed: {allowed})")]
    InvalidUnit {
        key: String,
        unit: String,
        line: usize,
        allowed: String,
    },

    #[error("line {line}: row has a value or unit but no key")]
    EmptyKey { line: usize },

    #[error("line {line}: empty value for key '{key}'")]
    EmptyValue { key: String, line: usize },

    #[error("line {line}: key '{key}' requires {shape}, got '{value}'")]
    InvalidValue {
        key: String,
        value: String,
        shape: ValueShape,
        line: usize,
    },

    #[error("line {line}: duplicate key '{key}' (first defined at line {first_line})")]
    DuplicateKey {
        key: String,
        line: usize,
        first_line: usize,
    },

    /// Alias maps may not chain or point at themselves.
    #[error("alias '{legacy}' -> '{canonical}' forms a chain: {reason}")]
    AliasChain {
        legacy: String,
        canonical: String,
        reason: String,
    },
}

impl CompileError {
    pub fn malformed(origin: &str, message: impl Into<String>) -> Self {
        CompileError::MalformedSource {
            origin: origin.to_owned(),
            message: message.into(),
        }
    }

    /// The offending key, when the error concerns a single row.
    pub fn key(&self) -> Option<&str> {
        match self {
            CompileError::InvalidUnit { key, .. }
            | CompileError::EmptyValue { key, .. }
            | CompileError::InvalidValue { key, .. }
            | CompileError::DuplicateKey { key, .. } => Some(key),
            CompileError::AliasChain { legacy, .. } => Some(legacy),
            CompileError::MalformedSource { .. }
            | CompileError::Unreadable { .. }
            | CompileError::EmptyKey { .. } => None,
        }
    }
}
