use serde_json::json;

use crate::config::Config;
use crate::pipeline::{compile_params, lint_templates, require_pass};
use crate::{fail, print_json, report_diagnostics, OutputFormat};

pub(crate) fn cmd_lint(config: &Config, output: OutputFormat, quiet: bool) {
    let compiled = compile_params(config).unwrap_or_else(|e| fail(&e, output));
    let report = lint_templates(config, &compiled.table).unwrap_or_else(|e| fail(&e, output));

    match output {
        OutputFormat::Json => print_json(&json!({ "lint": report })),
        OutputFormat::Text => {
            report_diagnostics(&report.findings, output, quiet);
            for key in &report.missing {
                if let Some(loc) = report.first_use(key) {
                    eprintln!("  {} is read at {}:{}", key, loc.file, loc.line);
                }
            }
        }
    }

    if let Err(e) = require_pass(&report) {
        fail(&e, output);
    }

    if !quiet && output == OutputFormat::Text {
        println!(
            "lint passed: {} key(s) defined, {} file(s) scanned, {} unused",
            report.defined_count,
            report.files_scanned,
            report.unused.len()
        );
    }
}
