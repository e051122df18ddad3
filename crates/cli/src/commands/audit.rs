use serde_json::json;

use crate::config::Config;
use crate::pipeline::audit;
use crate::{fail, print_json, OutputFormat};

/// Hits printed in text mode before the rest are summarized.
const MAX_PRINTED: usize = 200;

pub(crate) fn cmd_audit(config: &Config, output: OutputFormat, quiet: bool) {
    let hits = audit(config).unwrap_or_else(|e| fail(&e, output));

    match output {
        OutputFormat::Json => print_json(&json!({ "hits": hits })),
        OutputFormat::Text => {
            for hit in hits.iter().take(MAX_PRINTED) {
                println!("{}:{}: {}  {}", hit.file, hit.line, hit.value, hit.text);
            }
            if hits.len() > MAX_PRINTED {
                println!("... ({} more)", hits.len() - MAX_PRINTED);
            }
            if !quiet {
                eprintln!("{} hard-coded length(s) found", hits.len());
            }
        }
    }
}
