//! The build stages shared by every subcommand.
//!
//! Each stage renders in memory and returns its artifacts; nothing here
//! writes to disk.

use std::path::Path;

use hbpress_content::{load_content, load_outline, render_document, render_manual, ContentError};
use hbpress_core::{
    compile, load_parameters, render_symbols, resolve, AliasMap, Diagnostic, SymbolTable,
};
use hbpress_lint::{
    analyze, AuditHit, Auditor, LintError, LintReport, PatternTokenizer, TemplateCorpus,
};

use crate::artifact::Artifact;
use crate::config::{Config, ContentJob, ManualJob};

/// Output of the parameter stage.
pub struct CompiledParams {
    pub table: SymbolTable,
    pub alias_count: usize,
    pub artifact: Artifact,
}

/// Output of one content job.
pub struct RenderedContent {
    pub artifact: Artifact,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn compile_params(config: &Config) -> Result<CompiledParams, String> {
    let params = &config.params;
    let aliases = AliasMap::new(params.aliases.clone()).map_err(|e| e.to_string())?;
    let rows = load_parameters(&params.source).map_err(|e| e.to_string())?;
    let table = compile(&rows).map_err(|e| e.to_string())?;
    let edges = resolve(&table, &aliases);

    let source_name = file_name(&params.source);
    let contents = render_symbols(&table, &edges, &source_name);
    log::info!(
        "compiled {} symbol(s) and {} alias(es) from {}",
        table.len(),
        edges.len(),
        params.source.display()
    );
    Ok(CompiledParams {
        table,
        alias_count: edges.len(),
        artifact: Artifact::new(&params.output, contents),
    })
}

fn tokenizer(config: &Config) -> Result<PatternTokenizer, String> {
    PatternTokenizer::new(&config.lint.reference_pattern, &config.lint.ignore_patterns)
        .map_err(|e| e.to_string())
}

/// Cross-reference the compiled table against the template corpus.
///
/// The report is returned even when keys are missing; see [`require_pass`].
pub fn lint_templates(config: &Config, table: &SymbolTable) -> Result<LintReport, String> {
    let tokenizer = tokenizer(config)?;
    let corpus = TemplateCorpus::from_dirs(&config.lint.template_dirs, &config.lint.extensions)
        .map_err(|e| e.to_string())?;
    if corpus.is_empty() {
        log::warn!("no template files found; every defined key will be reported unused");
    }
    Ok(analyze(table, &corpus, &tokenizer))
}

/// Turn a failing report into the linter's missing-keys error message.
pub fn require_pass(report: &LintReport) -> Result<(), String> {
    if report.passed() {
        Ok(())
    } else {
        Err(LintError::MissingKeys {
            keys: report.missing.iter().cloned().collect(),
        }
        .to_string())
    }
}

pub fn render_content(job: &ContentJob) -> Result<RenderedContent, String> {
    let context = in_source(&job.source);
    let rows = load_content(&job.source).map_err(&context)?;
    let template = std::fs::read_to_string(&job.template)
        .map_err(|e| format!("could not read '{}': {}", job.template.display(), e))?;
    let document = render_document(&rows, &template, &job.schema()).map_err(&context)?;
    log::info!(
        "rendered {} row(s) from {} into {}",
        rows.len(),
        job.source.display(),
        job.output.display()
    );
    Ok(RenderedContent {
        artifact: Artifact::new(&job.output, document.text),
        diagnostics: document.diagnostics,
    })
}

/// Render every `[[content]]` job, then every `[[manual]]` job.
pub fn render_all_content(config: &Config) -> Result<Vec<RenderedContent>, String> {
    let mut rendered = config
        .content
        .iter()
        .map(render_content)
        .collect::<Result<Vec<_>, _>>()?;
    for job in &config.manual {
        rendered.extend(render_manual_job(job)?);
    }
    Ok(rendered)
}

/// Render a manual into its index and one page per outline section.
///
/// The index carries the job's diagnostics; pages carry none.
pub fn render_manual_job(job: &ManualJob) -> Result<Vec<RenderedContent>, String> {
    let outline = load_outline(&job.outline).map_err(in_source(&job.outline))?;
    let rows = load_content(&job.source).map_err(in_source(&job.source))?;
    let manual = render_manual(&outline, &rows, &job.title, &job.sections_dir)
        .map_err(in_source(&job.source))?;
    log::info!(
        "rendered {} section(s) from {} into {}",
        manual.pages.len(),
        job.outline.display(),
        job.output_dir.display()
    );

    let mut rendered = vec![RenderedContent {
        artifact: Artifact::new(&job.index_path(), manual.index),
        diagnostics: manual.diagnostics,
    }];
    rendered.extend(manual.pages.into_iter().map(|page| RenderedContent {
        artifact: Artifact::new(&job.page_path(&page.section_id), page.text),
        diagnostics: Vec::new(),
    }));
    Ok(rendered)
}

pub fn audit(config: &Config) -> Result<Vec<AuditHit>, String> {
    let auditor = Auditor::new(&config.lint.audit_ignore).map_err(|e| e.to_string())?;
    let corpus = TemplateCorpus::from_dirs(config.audit_dirs(), &config.lint.extensions)
        .map_err(|e| e.to_string())?;
    Ok(auditor.audit(&corpus))
}

/// Prefix content errors with their source file; load errors already name it.
fn in_source(source: &Path) -> impl Fn(ContentError) -> String + '_ {
    move |e| match e {
        ContentError::Source(inner) => inner.to_string(),
        other => format!("{}: {}", source.display(), other),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
