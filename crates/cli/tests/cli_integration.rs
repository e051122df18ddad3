//! CLI integration tests for every subcommand.
//!
//! Uses `assert_cmd` to spawn the `hbpress` binary against a config file
//! written into a temp directory. Inputs come from the workspace `fixtures/`
//! directory; all outputs land in the temp directory.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Locate the workspace root by walking up from CARGO_MANIFEST_DIR.
fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

fn fixture(rel: &str) -> String {
    workspace_root().join("fixtures").join(rel).display().to_string()
}

/// Write `hbpress.toml` into a fresh temp dir. Outputs are relative, so they
/// resolve inside the temp dir.
fn project(template_dir: &str, aliases: &str, content: &str) -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    let config = format!(
        "[params]\n\
         source = '{params}'\n\
         output = 'out/params.tex'\n\
         \n\
         [params.aliases]\n\
         {aliases}\n\
         \n\
         [lint]\n\
         template_dirs = ['{templates}']\n\
         \n\
         {content}\n",
        params = fixture("params/layout_params.csv"),
        templates = fixture(&format!("templates/{}", template_dir)),
        aliases = aliases,
        content = content,
    );
    fs::write(dir.path().join("hbpress.toml"), config).expect("write config");
    dir
}

fn safety_job(template: &str) -> String {
    format!(
        "[[content]]\n\
         source = '{source}'\n\
         template = '{template}'\n\
         output = 'out/safety.rst'\n\
         \n\
         [[content.parts]]\n\
         name = 'title'\n\
         kind = 'title'\n\
         \n\
         [[content.parts]]\n\
         name = 'lead'\n\
         kind = 'single'\n\
         \n\
         [[content.parts]]\n\
         name = 'safety_items'\n\
         kind = 'list'\n\
         min_chars = 4\n",
        source = fixture("content/safety_items.csv"),
        template = fixture(&format!("content/{}", template)),
    )
}

fn manual_job() -> String {
    format!(
        "[[manual]]\n\
         outline = '{outline}'\n\
         source = '{source}'\n\
         output_dir = 'out/manual'\n\
         title = 'HB Manual Demo'\n",
        outline = fixture("content/outline.csv"),
        source = fixture("content/blocks.csv"),
    )
}

const MARGIN_ALIAS: &str = "margin_top = 'page_margin_top'";

/// Helper: create a Command for the `hbpress` binary, rooted at `dir`.
fn hbpress(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("hbpress");
    cmd.current_dir(dir.path());
    cmd
}

// ──────────────────────────────────────────────
// 1. Help and configuration
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    let dir = TempDir::new().unwrap();
    hbpress(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Compile layout parameters"));
}

#[test]
fn missing_config_exits_1() {
    let dir = TempDir::new().unwrap();
    hbpress(&dir)
        .arg("lint")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("error: could not read"));
}

#[test]
fn unknown_subcommand_is_usage_error() {
    let dir = TempDir::new().unwrap();
    hbpress(&dir).arg("publish").assert().code(2);
}

#[test]
fn alias_chain_in_config_is_fatal() {
    let dir = project(
        "latex_theme",
        "margin_top = 'page_margin_top'\npage_margin_top = 'page_height'",
        "",
    );
    hbpress(&dir)
        .arg("params")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("forms a chain"));
    assert!(!dir.path().join("out/params.tex").exists());
}

// ──────────────────────────────────────────────
// 2. lint
// ──────────────────────────────────────────────

#[test]
fn lint_passes_and_warns_on_unused_key() {
    let dir = project("latex_theme", MARGIN_ALIAS, "");
    hbpress(&dir)
        .arg("lint")
        .assert()
        .success()
        .stdout(predicate::str::contains("lint passed: 13 key(s) defined"))
        .stderr(predicate::str::contains("warning[unused-key]"))
        .stderr(predicate::str::contains("'type_columns'"))
        .stderr(predicate::str::contains("warning[naming-convention]"));
}

#[test]
fn lint_quiet_suppresses_warnings() {
    let dir = project("latex_theme", MARGIN_ALIAS, "");
    hbpress(&dir)
        .args(["lint", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}

#[test]
fn lint_reports_all_missing_keys() {
    let dir = project("broken", MARGIN_ALIAS, "");
    hbpress(&dir)
        .arg("lint")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "error: missing keys referenced in templates: page_bleed, page_gutter",
        ))
        .stderr(predicate::str::contains("page_bleed is read at"));
}

#[test]
fn lint_json_output_is_a_report() {
    let dir = project("latex_theme", MARGIN_ALIAS, "");
    let out = hbpress(&dir)
        .args(["--output", "json", "lint"])
        .output()
        .expect("run");
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid JSON");
    assert_eq!(json["lint"]["unused"], serde_json::json!(["type_columns"]));
    assert_eq!(json["lint"]["missing"], serde_json::json!([]));
}

// ──────────────────────────────────────────────
// 3. params
// ──────────────────────────────────────────────

#[test]
fn params_writes_symbol_artifact_with_aliases() {
    let dir = project("latex_theme", MARGIN_ALIAS, "");
    hbpress(&dir)
        .arg("params")
        .assert()
        .success()
        .stdout(predicate::str::contains("13 symbol(s), 1 alias(es)"));

    let text = fs::read_to_string(dir.path().join("out/params.tex")).unwrap();
    assert!(text.starts_with("% AUTO-GENERATED. DO NOT EDIT BY HAND.\n% Source: layout_params.csv\n"));
    assert!(text.contains("\\expandafter\\def\\csname HBpage_width\\endcsname{148mm}"));
    assert!(text.contains("% ===== ALIASES =====\n\n% ----- OTHER -----\n"));
    assert!(text.contains(
        "\\expandafter\\def\\csname HBmargin_top\\endcsname{\\csname HBpage_margin_top\\endcsname}"
    ));
    assert!(text.ends_with("}\n"));
}

#[test]
fn params_check_detects_drift() {
    let dir = project("latex_theme", MARGIN_ALIAS, "");
    hbpress(&dir)
        .args(["params", "--check"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is out of date"));

    hbpress(&dir).arg("params").assert().success();
    hbpress(&dir)
        .args(["params", "--check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("up to date"));
}

#[test]
fn params_output_is_byte_identical_across_runs() {
    let dir = project("latex_theme", MARGIN_ALIAS, "");
    let path = dir.path().join("out/params.tex");
    hbpress(&dir).arg("params").assert().success();
    let first = fs::read(&path).unwrap();
    hbpress(&dir).arg("params").assert().success();
    assert_eq!(first, fs::read(&path).unwrap());
}

// ──────────────────────────────────────────────
// 4. content
// ──────────────────────────────────────────────

#[test]
fn content_renders_safety_document() {
    let dir = project("latex_theme", MARGIN_ALIAS, &safety_job("safety_template.rst"));
    hbpress(&dir)
        .arg("content")
        .assert()
        .success()
        .stderr(predicate::str::contains("warning[ignored-single-value]: line 4"));

    let expected = fs::read_to_string(fixture("content/safety_expected.rst")).unwrap();
    let actual = fs::read_to_string(dir.path().join("out/safety.rst")).unwrap();
    assert_eq!(actual, expected);
}

#[test]
fn content_missing_placeholder_writes_nothing() {
    let dir = project("latex_theme", MARGIN_ALIAS, &safety_job("manual_template.rst"));
    hbpress(&dir)
        .arg("content")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("template is missing placeholder(s)"))
        .stderr(predicate::str::contains("{{ safety_items }}"));
    assert!(!dir.path().join("out/safety.rst").exists());
}

#[test]
fn content_writes_manual_pages_and_index() {
    let dir = project("latex_theme", MARGIN_ALIAS, &manual_job());
    hbpress(&dir)
        .arg("content")
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote out/manual/index.rst"));

    let out = dir.path().join("out/manual");
    let index = fs::read_to_string(out.join("index.rst")).unwrap();
    assert_eq!(
        index,
        fs::read_to_string(fixture("content/manual_index_expected.rst")).unwrap()
    );
    let warranty = fs::read_to_string(out.join("_sections/warranty.rst")).unwrap();
    assert_eq!(
        warranty,
        fs::read_to_string(fixture("content/manual_warranty_expected.rst")).unwrap()
    );
    assert!(out.join("_sections/intro.rst").exists());
    assert!(!out.join("_sections/draft.rst").exists());

    hbpress(&dir).args(["content", "--check"]).assert().success();
}

// ──────────────────────────────────────────────
// 5. build
// ──────────────────────────────────────────────

#[test]
fn build_writes_artifacts_and_manifest() {
    let dir = project("latex_theme", MARGIN_ALIAS, &safety_job("safety_template.rst"));
    hbpress(&dir)
        .args(["build", "--manifest", "out/manifest.json"])
        .assert()
        .success();

    assert!(dir.path().join("out/params.tex").exists());
    assert!(dir.path().join("out/safety.rst").exists());

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("out/manifest.json")).unwrap())
            .unwrap();
    let artifacts = manifest["artifacts"].as_object().expect("artifacts map");
    assert_eq!(artifacts.len(), 2);
    let etag = manifest["etag"].as_str().unwrap();
    assert_eq!(etag.len(), 64);
    assert!(etag.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn build_stops_on_lint_failure_before_writing() {
    let dir = project("broken", MARGIN_ALIAS, &safety_job("safety_template.rst"));
    hbpress(&dir)
        .arg("build")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing keys"));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn build_stops_on_content_failure_before_writing() {
    let dir = project("latex_theme", MARGIN_ALIAS, &safety_job("manual_template.rst"));
    hbpress(&dir).arg("build").assert().code(1);
    assert!(!dir.path().join("out/params.tex").exists());
}

#[test]
fn build_write_failure_leaves_no_artifacts() {
    let dir = project("latex_theme", MARGIN_ALIAS, &safety_job("safety_template.rst"));
    fs::create_dir_all(dir.path().join("out/safety.rst")).unwrap();
    hbpress(&dir)
        .arg("build")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("target is a directory"));
    assert!(!dir.path().join("out/params.tex").exists());
}

// ──────────────────────────────────────────────
// 6. audit
// ──────────────────────────────────────────────

#[test]
fn audit_lists_hard_coded_lengths() {
    let dir = project("latex_theme", MARGIN_ALIAS, "");
    hbpress(&dir)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("components.tex:6: 0.55pt"))
        .stderr(predicate::str::contains("1 hard-coded length(s) found"));
}

#[test]
fn json_errors_are_objects() {
    let dir = project("broken", MARGIN_ALIAS, "");
    hbpress(&dir)
        .args(["--output", "json", "lint"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("{\"error\":"));
}
