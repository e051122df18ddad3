//! Rendered outputs and atomic file writes.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// A fully rendered output held in memory until every step has succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

impl Artifact {
    pub fn new(path: &Path, contents: String) -> Self {
        Artifact {
            path: path.to_path_buf(),
            contents,
        }
    }

    /// Whether the file on disk already holds exactly these contents.
    pub fn is_current(&self) -> bool {
        fs::read_to_string(&self.path)
            .map(|existing| existing == self.contents)
            .unwrap_or(false)
    }
}

/// Write `contents` to `path` via a temp file in the same directory, so
/// readers never observe a half-written file.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), String> {
    let staged = stage(path, contents)?;
    persist(staged, path)
}

/// Write every artifact or none of them.
///
/// All contents are first staged as temp files beside their targets; only
/// when every artifact is staged are they moved into place. A failure while
/// staging drops the temp files and leaves the targets untouched.
pub fn write_all(artifacts: &[Artifact]) -> Result<(), String> {
    let staged = artifacts
        .iter()
        .map(|a| stage(&a.path, &a.contents))
        .collect::<Result<Vec<_>, _>>()?;
    for (tmp, artifact) in staged.into_iter().zip(artifacts) {
        persist(tmp, &artifact.path)?;
    }
    Ok(())
}

fn stage(path: &Path, contents: &str) -> Result<NamedTempFile, String> {
    if path.is_dir() {
        return Err(format!(
            "could not write '{}': target is a directory",
            path.display()
        ));
    }
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .map_err(|e| format!("could not create '{}': {}", dir.display(), e))?;

    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|e| format!("could not create temp file in '{}': {}", dir.display(), e))?;
    tmp.write_all(contents.as_bytes())
        .map_err(|e| format!("could not write '{}': {}", path.display(), e))?;
    Ok(tmp)
}

fn persist(tmp: NamedTempFile, path: &Path) -> Result<(), String> {
    tmp.persist(path)
        .map_err(|e| format!("could not write '{}': {}", path.display(), e.error))?;
    log::debug!("wrote {}", path.display());
    Ok(())
}

/// Paths of artifacts whose on-disk contents differ from the rendering.
pub fn stale(artifacts: &[Artifact]) -> Vec<&Path> {
    artifacts
        .iter()
        .filter(|a| !a.is_current())
        .map(|a| a.path.as_path())
        .collect()
}
