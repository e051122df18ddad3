use std::path::Path;

use serde_json::json;

use crate::artifact::{write_all, Artifact};
use crate::config::Config;
use crate::manifest::{build_manifest, compute_etag};
use crate::pipeline::{compile_params, lint_templates, render_all_content, require_pass};
use crate::{display, fail, print_json, report_diagnostics, OutputFormat};

/// Lint, then compile, then render. Artifacts are written only after every
/// stage has succeeded.
pub(crate) fn cmd_build(
    config: &Config,
    manifest: Option<&Path>,
    output: OutputFormat,
    quiet: bool,
) {
    let compiled = compile_params(config).unwrap_or_else(|e| fail(&e, output));
    let report = lint_templates(config, &compiled.table).unwrap_or_else(|e| fail(&e, output));
    if let Err(e) = require_pass(&report) {
        fail(&e, output);
    }

    let mut diagnostics = report.findings.clone();
    let mut artifacts = vec![compiled.artifact];
    for job in render_all_content(config).unwrap_or_else(|e| fail(&e, output)) {
        diagnostics.extend(job.diagnostics);
        artifacts.push(job.artifact);
    }
    report_diagnostics(&diagnostics, output, quiet);

    if let Some(path) = manifest {
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let doc = build_manifest(&artifacts, base);
        let contents = serde_json::to_string_pretty(&doc)
            .unwrap_or_else(|e| fail(&format!("serialization error: {}", e), output));
        artifacts.push(Artifact::new(path, contents + "\n"));
    }

    if let Err(e) = write_all(&artifacts) {
        fail(&e, output);
    }

    match output {
        OutputFormat::Json => {
            let written: Vec<_> = artifacts
                .iter()
                .map(|a| json!({ "path": display(&a.path), "etag": compute_etag(&a.contents) }))
                .collect();
            print_json(&json!({ "artifacts": written, "diagnostics": diagnostics }));
        }
        OutputFormat::Text if !quiet => {
            for a in &artifacts {
                println!("wrote {}", display(&a.path));
            }
        }
        OutputFormat::Text => {}
    }
}
