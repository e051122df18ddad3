//! Integration tests for the parameter symbol compiler.
//!
//! These tests load real CSV fixtures from the workspace `fixtures/`
//! directory, compile them, and verify the rendered artifact.

use hbpress_core::{
    compile, load_parameters, render_symbols, resolve, AliasMap, CompileError, Group, ValueShape,
};
use std::path::{Path, PathBuf};

/// Locate the workspace root.
fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

fn fixture(name: &str) -> PathBuf {
    workspace_root().join("fixtures/params").join(name)
}

fn compile_fixture(name: &str) -> Result<hbpress_core::SymbolTable, CompileError> {
    let rows = load_parameters(&fixture(name))?;
    compile(&rows)
}

// ──────────────────────────────────────────────
// Valid table
// ──────────────────────────────────────────────

#[test]
fn layout_params_compile() {
    let table = compile_fixture("layout_params.csv").expect("fixture compiles");
    assert_eq!(table.len(), 13);
    assert_eq!(table.get("page_margin_top").unwrap().value, "12.5mm");
    assert_eq!(table.get("type_body_leading").unwrap().value, "1.2");
    assert_eq!(table.get("brand_color_ink").unwrap().value, "0,0,0,0.8");
    assert_eq!(table.get("page_logo_viewport").unwrap().value, "0 0 100 40");
    assert_eq!(table.get("section_after_fix").unwrap().group, Group::Page);
}

#[test]
fn layout_params_warn_on_legacy_naming_only() {
    let table = compile_fixture("layout_params.csv").unwrap();
    let warned: Vec<_> = table
        .warnings()
        .iter()
        .map(|w| (w.code, w.key.clone().unwrap_or_default()))
        .collect();
    assert_eq!(
        warned,
        vec![("naming-convention", "margin_top".to_string())]
    );
}

#[test]
fn rendering_is_deterministic() {
    let aliases = AliasMap::new([("margin_top", "page_margin_top")]).unwrap();
    let render = || {
        let table = compile_fixture("layout_params.csv").unwrap();
        let edges = resolve(&table, &aliases);
        render_symbols(&table, &edges, "layout_params.csv")
    };
    assert_eq!(render(), render());
}

#[test]
fn banners_follow_group_order() {
    let table = compile_fixture("layout_params.csv").unwrap();
    let out = render_symbols(&table, &[], "layout_params.csv");
    let positions: Vec<usize> = ["PAGE", "BRAND", "TYPE SYSTEM", "COMPONENTS", "OTHER"]
        .iter()
        .map(|b| {
            out.find(&format!("% ===== {} =====", b))
                .unwrap_or_else(|| panic!("banner {} missing", b))
        })
        .collect();
    let mut sorted = positions.clone();
    sorted.sort();
    assert_eq!(positions, sorted);
    assert!(out.contains("% Body ink at 80\\%"));
    assert!(out.contains("%% --- Brand ---"));
}

#[test]
fn input_order_does_not_affect_output() {
    let forward = "key,value,unit,comment\npage_a,1,mm,\ncomp_b,2,mm,\ntype_c,3,pt,\n";
    let reversed = "key,value,unit,comment\ntype_c,3,pt,\ncomp_b,2,mm,\npage_a,1,mm,\n";
    let render = |src: &str| {
        let rows = hbpress_core::parse_parameters("p.csv", src.as_bytes()).unwrap();
        render_symbols(&compile(&rows).unwrap(), &[], "p.csv")
    };
    assert_eq!(render(forward), render(reversed));
}

// ──────────────────────────────────────────────
// Rejected tables
// ──────────────────────────────────────────────

#[test]
fn duplicate_key_fixture_fails() {
    let err = compile_fixture("duplicate_key.csv").unwrap_err();
    assert_eq!(
        err,
        CompileError::DuplicateKey {
            key: "page_width".into(),
            line: 4,
            first_line: 2
        }
    );
}

#[test]
fn invalid_unit_fixture_fails() {
    let err = compile_fixture("invalid_unit.csv").unwrap_err();
    assert!(matches!(err, CompileError::InvalidUnit { ref unit, .. } if unit == "px"));
}

#[test]
fn three_number_viewport_fails() {
    let err = compile_fixture("bad_viewport.csv").unwrap_err();
    assert!(matches!(
        err,
        CompileError::InvalidValue {
            shape: ValueShape::Viewport,
            ..
        }
    ));
}

#[test]
fn missing_column_fails_before_rows() {
    let err = compile_fixture("missing_unit_column.csv").unwrap_err();
    assert!(matches!(err, CompileError::MalformedSource { .. }));
    assert!(err.to_string().contains("missing required column: unit"));
}

#[test]
fn unreadable_source_is_reported() {
    let err = compile_fixture("does_not_exist.csv").unwrap_err();
    assert!(matches!(err, CompileError::Unreadable { .. }));
}
