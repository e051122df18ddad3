use serde_json::json;

use crate::artifact::{stale, write_all, Artifact};
use crate::config::Config;
use crate::pipeline::render_all_content;
use crate::{display, fail, print_json, report_diagnostics, OutputFormat};

pub(crate) fn cmd_content(config: &Config, check: bool, output: OutputFormat, quiet: bool) {
    if config.content.is_empty() && config.manual.is_empty() {
        log::warn!("no [[content]] or [[manual]] jobs configured");
    }
    let rendered = render_all_content(config).unwrap_or_else(|e| fail(&e, output));

    let mut diagnostics = Vec::new();
    let mut artifacts: Vec<Artifact> = Vec::new();
    for job in rendered {
        diagnostics.extend(job.diagnostics);
        artifacts.push(job.artifact);
    }
    report_diagnostics(&diagnostics, output, quiet);

    if check {
        let outdated = stale(&artifacts);
        if !outdated.is_empty() {
            let names: Vec<String> = outdated.iter().map(|p| display(p)).collect();
            fail(
                &format!("out of date: {}; run `hbpress content`", names.join(", ")),
                output,
            );
        }
    } else if let Err(e) = write_all(&artifacts) {
        fail(&e, output);
    }

    let outputs: Vec<String> = artifacts.iter().map(|a| display(&a.path)).collect();
    match output {
        OutputFormat::Json => print_json(&json!({
            "outputs": outputs,
            "checked": check,
            "diagnostics": diagnostics,
        })),
        OutputFormat::Text if !quiet => {
            for path in &outputs {
                let verb = if check { "up to date" } else { "wrote" };
                println!("{} {}", verb, path);
            }
        }
        OutputFormat::Text => {}
    }
}
