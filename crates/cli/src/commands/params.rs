use serde_json::json;

use crate::artifact::write_atomic;
use crate::config::Config;
use crate::pipeline::compile_params;
use crate::{display, fail, print_json, report_diagnostics, OutputFormat};

pub(crate) fn cmd_params(config: &Config, check: bool, output: OutputFormat, quiet: bool) {
    let compiled = compile_params(config).unwrap_or_else(|e| fail(&e, output));
    report_diagnostics(compiled.table.warnings(), output, quiet);

    let artifact = &compiled.artifact;
    let path = display(&artifact.path);
    if check {
        if !artifact.is_current() {
            fail(
                &format!("'{}' is out of date; run `hbpress params`", path),
                output,
            );
        }
    } else if let Err(e) = write_atomic(&artifact.path, &artifact.contents) {
        fail(&e, output);
    }

    match output {
        OutputFormat::Json => print_json(&json!({
            "output": path,
            "symbols": compiled.table.len(),
            "aliases": compiled.alias_count,
            "checked": check,
            "warnings": compiled.table.warnings(),
        })),
        OutputFormat::Text if !quiet => {
            let verb = if check { "up to date" } else { "wrote" };
            println!(
                "{} {} ({} symbol(s), {} alias(es))",
                verb,
                path,
                compiled.table.len(),
                compiled.alias_count
            );
        }
        OutputFormat::Text => {}
    }
}
