//! `hbpress.toml` configuration.
//!
//! # Example
//!
//! ```toml
//! [params]
//! source = "data/layout_params.csv"
//! output = "build/params.tex"
//!
//! [params.aliases]
//! margin_top = "page_margin_top"
//!
//! [lint]
//! template_dirs = ["templates/latex_theme"]
//!
//! [[content]]
//! source = "data/safety_items.csv"
//! template = "templates/safety.rst"
//! output = "build/safety.rst"
//!
//! [[content.parts]]
//! name = "safety_items"
//! kind = "list"
//!
//! [[manual]]
//! outline = "data/outline.csv"
//! source = "data/blocks.csv"
//! output_dir = "build/manual"
//! title = "Owner's Manual"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use hbpress_content::{ContentSchema, PartSpec};
use hbpress_lint::{DEFAULT_IGNORE_PATTERNS, DEFAULT_REFERENCE_PATTERN};
use serde::{Deserialize, Serialize};

// ── Types ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub params: ParamsConfig,
    #[serde(default)]
    pub lint: LintConfig,
    #[serde(default)]
    pub content: Vec<ContentJob>,
    #[serde(default)]
    pub manual: Vec<ManualJob>,
}

/// `[params]` section: the parameter table and its symbol artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamsConfig {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Legacy key -> canonical key.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

/// `[lint]` section: where templates live and how references look.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintConfig {
    #[serde(default)]
    pub template_dirs: Vec<PathBuf>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,
    #[serde(default = "default_reference_pattern")]
    pub reference_pattern: String,
    /// Directories scanned by `hbpress audit`; defaults to `template_dirs`.
    #[serde(default)]
    pub audit_dirs: Vec<PathBuf>,
    /// Extra patterns for lines the audit should skip.
    #[serde(default)]
    pub audit_ignore: Vec<String>,
}

impl Default for LintConfig {
    fn default() -> Self {
        LintConfig {
            template_dirs: Vec::new(),
            extensions: default_extensions(),
            ignore_patterns: default_ignore_patterns(),
            reference_pattern: default_reference_pattern(),
            audit_dirs: Vec::new(),
            audit_ignore: Vec::new(),
        }
    }
}

/// One `[[content]]` job: rows + template -> injected document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentJob {
    pub source: PathBuf,
    pub template: PathBuf,
    pub output: PathBuf,
    #[serde(default)]
    pub strict_single: bool,
    #[serde(default)]
    pub parts: Vec<PartSpec>,
}

impl ContentJob {
    pub fn schema(&self) -> ContentSchema {
        ContentSchema {
            strict_single: self.strict_single,
            parts: self.parts.clone(),
        }
    }
}

/// One `[[manual]]` job: outline + typed blocks -> section pages and an index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualJob {
    pub outline: PathBuf,
    pub source: PathBuf,
    pub output_dir: PathBuf,
    #[serde(default = "default_manual_title")]
    pub title: String,
    /// Page directory below `output_dir`, as written into the toctree.
    #[serde(default = "default_sections_dir")]
    pub sections_dir: String,
}

impl ManualJob {
    pub fn index_path(&self) -> PathBuf {
        self.output_dir.join("index.rst")
    }

    pub fn page_path(&self, section_id: &str) -> PathBuf {
        self.output_dir
            .join(&self.sections_dir)
            .join(format!("{}.rst", section_id))
    }
}

fn default_manual_title() -> String {
    "Manual".to_string()
}

fn default_sections_dir() -> String {
    "_sections".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["tex".to_string()]
}

fn default_ignore_patterns() -> Vec<String> {
    DEFAULT_IGNORE_PATTERNS.iter().map(|s| s.to_string()).collect()
}

fn default_reference_pattern() -> String {
    DEFAULT_REFERENCE_PATTERN.to_string()
}

// ── Functions ─────────────────────────────────────────────────────────────────

/// Read and parse the config at `path`, resolving every relative path
/// against the config file's directory.
///
/// Returns a human-readable error string on failure.
pub fn read_config(path: &Path) -> Result<Config, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;
    let mut config: Config = toml::from_str(&content)
        .map_err(|e| format!("could not parse '{}': {}", path.display(), e))?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    config.resolve_paths(base);
    Ok(config)
}

impl Config {
    fn resolve_paths(&mut self, base: &Path) {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        join(&mut self.params.source);
        join(&mut self.params.output);
        self.lint.template_dirs.iter_mut().for_each(join);
        self.lint.audit_dirs.iter_mut().for_each(join);
        for job in &mut self.content {
            join(&mut job.source);
            join(&mut job.template);
            join(&mut job.output);
        }
        for job in &mut self.manual {
            join(&mut job.outline);
            join(&mut job.source);
            join(&mut job.output_dir);
        }
    }

    /// Directories the length audit scans.
    pub fn audit_dirs(&self) -> &[PathBuf] {
        if self.lint.audit_dirs.is_empty() {
            &self.lint.template_dirs
        } else {
            &self.lint.audit_dirs
        }
    }
}
