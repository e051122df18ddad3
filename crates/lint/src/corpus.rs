//! Template corpus: the read-only set of files scanned for references.
//!
//! [`TemplateCorpus::from_dirs`] walks directories on disk;
//! [`TemplateCorpus::from_files`] builds a corpus in memory for tests and
//! embedding. Files are read once and held as text; no handle outlives the
//! load.

use crate::error::LintError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A template file and its (lossily decoded) text.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateFile {
    pub path: PathBuf,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct TemplateCorpus {
    files: Vec<TemplateFile>,
}

impl TemplateCorpus {
    /// Recursively collect files under `dirs` whose extension is in
    /// `extensions` (case-insensitive). Missing directories are skipped.
    /// Files are ordered by path.
    pub fn from_dirs(dirs: &[PathBuf], extensions: &[String]) -> Result<Self, LintError> {
        let mut files = Vec::new();
        for dir in dirs {
            if !dir.exists() {
                log::info!("template directory not found, skipping: {}", dir.display());
                continue;
            }
            for entry in WalkDir::new(dir).sort_by_file_name() {
                let entry = entry.map_err(|e| LintError::Corpus {
                    path: dir.clone(),
                    message: e.to_string(),
                })?;
                if !entry.file_type().is_file() || !has_extension(entry.path(), extensions) {
                    continue;
                }
                let bytes = std::fs::read(entry.path()).map_err(|e| LintError::Corpus {
                    path: entry.path().to_path_buf(),
                    message: e.to_string(),
                })?;
                files.push(TemplateFile {
                    path: entry.path().to_path_buf(),
                    text: String::from_utf8_lossy(&bytes).into_owned(),
                });
            }
        }
        files.sort_by(|a, b| a.path.cmp(&b.path));
        log::debug!("loaded {} template files", files.len());
        Ok(TemplateCorpus { files })
    }

    /// Build a corpus from in-memory `(path, text)` pairs.
    pub fn from_files<I, P, S>(files: I) -> Self
    where
        I: IntoIterator<Item = (P, S)>,
        P: Into<PathBuf>,
        S: Into<String>,
    {
        let mut files: Vec<TemplateFile> = files
            .into_iter()
            .map(|(path, text)| TemplateFile {
                path: path.into(),
                text: text.into(),
            })
            .collect();
        files.sort_by(|a, b| a.path.cmp(&b.path));
        TemplateCorpus { files }
    }

    pub fn files(&self) -> &[TemplateFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}
