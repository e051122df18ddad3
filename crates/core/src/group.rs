//! Key groups: the fixed namespace categories that order emission.

use serde::Serialize;
use std::fmt;

/// Exact-match legacy key that belongs to the page group.
pub const LEGACY_PAGE_KEY: &str = "section_after_fix";

/// Namespace category of a key, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Group {
    Page,
    Brand,
    TypeSystem,
    Components,
    Other,
}

impl Group {
    /// Derive the group from a key prefix (case-insensitive).
    pub fn of_key(key: &str) -> Group {
        let k = key.to_ascii_lowercase();
        if k.starts_with("page_") || k == LEGACY_PAGE_KEY {
            Group::Page
        } else if k.starts_with("brand_color_") {
            Group::Brand
        } else if k.starts_with("type_") {
            Group::TypeSystem
        } else if k.starts_with("comp_") {
            Group::Components
        } else {
            Group::Other
        }
    }

    /// Banner text used in the symbol artifact.
    pub fn banner(self) -> &'static str {
        match self {
            Group::Page => "PAGE",
            Group::Brand => "BRAND",
            Group::TypeSystem => "TYPE SYSTEM",
            Group::Components => "COMPONENTS",
            Group::Other => "OTHER",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.banner())
    }
}
