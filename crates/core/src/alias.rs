//! Alias Resolver: opportunistic forwarding from legacy keys to canonical ones.
//!
//! The alias map is passed in by the caller. An edge is emitted only when
//! both keys exist in the compiled table; otherwise the pair is skipped
//! silently. Emitted edges are realized as lookups through the canonical
//! symbol, never as copies of its value.

use crate::error::CompileError;
use crate::group::Group;
use crate::symbols::SymbolTable;
use serde::Serialize;
use std::collections::BTreeMap;

/// A validated `legacy -> canonical` map with no chains or self-references.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AliasMap {
    pairs: BTreeMap<String, String>,
}

impl AliasMap {
    /// Build an alias map, rejecting self-aliases and chains (a canonical key
    /// that is itself declared as a legacy key).
    pub fn new<I, K, V>(pairs: I) -> Result<AliasMap, CompileError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let pairs: BTreeMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        for (legacy, canonical) in &pairs {
            if legacy == canonical {
                return Err(CompileError::AliasChain {
                    legacy: legacy.clone(),
                    canonical: canonical.clone(),
                    reason: "alias points at itself".to_owned(),
                });
            }
            if let Some(next) = pairs.get(canonical) {
                return Err(CompileError::AliasChain {
                    legacy: legacy.clone(),
                    canonical: canonical.clone(),
                    reason: format!("'{}' is itself an alias of '{}'", canonical, next),
                });
            }
        }
        Ok(AliasMap { pairs })
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A forwarding declaration realized as a runtime indirection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasEdge {
    pub from_key: String,
    pub to_key: String,
}

impl AliasEdge {
    pub fn group(&self) -> Group {
        Group::of_key(&self.from_key)
    }
}

/// Compute the alias edges applicable to `table`, in emission order
/// `(group of legacy key, legacy key)`.
pub fn resolve(table: &SymbolTable, aliases: &AliasMap) -> Vec<AliasEdge> {
    let mut edges: Vec<AliasEdge> = aliases
        .iter()
        .filter(|(legacy, canonical)| {
            let present = table.contains(legacy) && table.contains(canonical);
            if !present {
                log::debug!("skipping alias {} -> {}: key not defined", legacy, canonical);
            }
            present
        })
        .map(|(legacy, canonical)| AliasEdge {
            from_key: legacy.to_owned(),
            to_key: canonical.to_owned(),
        })
        .collect();
    edges.sort_by(|a, b| (a.group(), &a.from_key).cmp(&(b.group(), &b.from_key)));
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::compile;
    use crate::params::ParameterRow;

    fn table(keys: &[&str]) -> SymbolTable {
        let rows: Vec<ParameterRow> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| ParameterRow::entry(k, "1", "mm", "", i + 2))
            .collect();
        compile(&rows).unwrap()
    }

    #[test]
    fn edge_requires_both_keys() {
        let t = table(&["page_margin_top", "margin_top"]);
        let aliases = AliasMap::new([
            ("margin_top", "page_margin_top"),
            ("margin_bottom", "page_margin_bottom"),
        ])
        .unwrap();
        let edges = resolve(&t, &aliases);
        assert_eq!(
            edges,
            vec![AliasEdge {
                from_key: "margin_top".into(),
                to_key: "page_margin_top".into()
            }]
        );
    }

    #[test]
    fn only_legacy_present_yields_nothing() {
        let t = table(&["margin_top"]);
        let aliases = AliasMap::new([("margin_top", "page_margin_top")]).unwrap();
        assert!(resolve(&t, &aliases).is_empty());
    }

    #[test]
    fn edges_sorted_by_group_then_key() {
        let t = table(&[
            "page_a", "page_b", "comp_x", "old_b", "old_a", "type_old", "comp_y",
        ]);
        let aliases = AliasMap::new([
            ("old_b", "page_b"),
            ("old_a", "page_a"),
            ("type_old", "comp_x"),
            ("comp_y", "comp_x"),
        ])
        .unwrap();
        let from: Vec<String> = resolve(&t, &aliases)
            .into_iter()
            .map(|e| e.from_key)
            .collect();
        assert_eq!(from, vec!["type_old", "comp_y", "old_a", "old_b"]);
    }

    #[test]
    fn self_alias_is_rejected() {
        let err = AliasMap::new([("page_a", "page_a")]).unwrap_err();
        assert!(matches!(err, CompileError::AliasChain { .. }));
    }

    #[test]
    fn chained_alias_is_rejected() {
        let err = AliasMap::new([("a_old", "b_mid"), ("b_mid", "page_c")]).unwrap_err();
        assert_eq!(
            err,
            CompileError::AliasChain {
                legacy: "a_old".into(),
                canonical: "b_mid".into(),
                reason: "'b_mid' is itself an alias of 'page_c'".into(),
            }
        );
    }
}
