//! Units and the value grammars they impose.

use crate::error::ValueShape;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)$").unwrap());
static INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[+-]?\d+$").unwrap());

/// A parameter unit from the fixed allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Empty unit cell.
    Bare,
    None,
    Null,
    Mm,
    Pt,
    Em,
    Ex,
    Ratio,
    Int,
    Cmyk,
}

impl Unit {
    pub const ALL: [Unit; 10] = [
        Unit::Bare,
        Unit::None,
        Unit::Null,
        Unit::Mm,
        Unit::Pt,
        Unit::Em,
        Unit::Ex,
        Unit::Ratio,
        Unit::Int,
        Unit::Cmyk,
    ];

    /// Parse a unit cell, case-insensitively. Returns `None` if not allowed.
    pub fn parse(s: &str) -> Option<Unit> {
        let unit = match s.trim().to_ascii_lowercase().as_str() {
            "" => Unit::Bare,
            "none" => Unit::None,
            "null" => Unit::Null,
            "mm" => Unit::Mm,
            "pt" => Unit::Pt,
            "em" => Unit::Em,
            "ex" => Unit::Ex,
            "ratio" => Unit::Ratio,
            "int" => Unit::Int,
            "cmyk" => Unit::Cmyk,
            _ => return None,
        };
        Some(unit)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Bare => "",
            Unit::None => "none",
            Unit::Null => "null",
            Unit::Mm => "mm",
            Unit::Pt => "pt",
            Unit::Em => "em",
            Unit::Ex => "ex",
            Unit::Ratio => "ratio",
            Unit::Int => "int",
            Unit::Cmyk => "cmyk",
        }
    }

    /// Raw units are emitted without a suffix.
    pub fn is_raw(self) -> bool {
        matches!(
            self,
            Unit::Bare | Unit::None | Unit::Null | Unit::Ratio | Unit::Int | Unit::Cmyk
        )
    }

    /// Format `value` for emission: length units append their suffix.
    pub fn format(self, value: &str) -> String {
        if self.is_raw() {
            value.to_owned()
        } else {
            format!("{}{}", value, self.as_str())
        }
    }

    /// Comma-separated allow-list for error messages.
    pub fn allowed_list() -> String {
        Unit::ALL
            .iter()
            .map(|u| format!("'{}'", u.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Check `value` against this unit's grammar, honoring the `_viewport`
    /// key convention which overrides the declared unit.
    pub fn check(self, key: &str, value: &str) -> Result<(), ValueShape> {
        if key.ends_with("_viewport") {
            return check_viewport(value);
        }
        match self {
            Unit::Mm | Unit::Pt | Unit::Em | Unit::Ex | Unit::Ratio => {
                if is_number(value) {
                    Ok(())
                } else {
                    Err(ValueShape::Number)
                }
            }
            Unit::Int => {
                if INTEGER.is_match(value) {
                    Ok(())
                } else {
                    Err(ValueShape::Integer)
                }
            }
            Unit::Cmyk => check_cmyk(value),
            Unit::Bare | Unit::None | Unit::Null => Ok(()),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn is_number(s: &str) -> bool {
    NUMBER.is_match(s)
}

fn check_viewport(value: &str) -> Result<(), ValueShape> {
    let parts: Vec<&str> = value.split_whitespace().collect();
    let ok = parts.len() == 4
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()));
    if ok {
        Ok(())
    } else {
        Err(ValueShape::Viewport)
    }
}

fn check_cmyk(value: &str) -> Result<(), ValueShape> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() == 4 && parts.iter().all(|p| is_number(p)) {
        Ok(())
    } else {
        Err(ValueShape::Cmyk)
    }
}
