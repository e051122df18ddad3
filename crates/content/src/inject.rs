//! Template Injector: `{{ name }}` placeholder substitution.

use crate::error::ContentError;
use regex::{Captures, Regex};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_.\-]+)\s*\}\}").expect("placeholder pattern is valid")
});

static PLACEHOLDER_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("name pattern is valid"));

/// Whether `name` can appear inside a `{{ name }}` token.
pub fn is_placeholder_name(name: &str) -> bool {
    PLACEHOLDER_NAME.is_match(name)
}

/// Names of every placeholder token present in `template`.
pub fn placeholders(template: &str) -> BTreeSet<&str> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Substitute `blocks` into `template`.
///
/// Every key of `blocks` must name a placeholder in the template; if any is
/// absent nothing is substituted and all missing names are reported.
/// Substitution is a single left-to-right scan over the template text, so
/// placeholder-shaped text inside an inserted block stays literal. Tokens
/// with no entry in `blocks` are left as they are.
pub fn inject(template: &str, blocks: &BTreeMap<String, String>) -> Result<String, ContentError> {
    let present = placeholders(template);
    let missing: Vec<String> = blocks
        .keys()
        .filter(|name| !present.contains(name.as_str()))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(ContentError::MissingPlaceholder {
            placeholders: missing,
        });
    }

    let out = PLACEHOLDER.replace_all(template, |caps: &Captures| match blocks.get(&caps[1]) {
        Some(block) => block.clone(),
        None => caps[0].to_owned(),
    });
    log::debug!("injected {} placeholder(s)", blocks.len());
    Ok(out.into_owned())
}
