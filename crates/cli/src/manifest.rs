use std::path::Path;

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::artifact::Artifact;

/// Build manifest format version.
const MANIFEST_VERSION: &str = "1.0";

/// SHA-256 etag of an artifact's contents.
pub fn compute_etag(contents: &str) -> String {
    let hash = Sha256::digest(contents.as_bytes());
    format!("{:x}", hash)
}

/// Describe a build's artifacts with per-file etags.
///
/// Artifact paths are written relative to `base` when they live under it.
/// `serde_json::Map` is backed by `BTreeMap`, so keys come out sorted and
/// the top-level etag (over the compact `artifacts` object) is stable.
pub fn build_manifest(artifacts: &[Artifact], base: &Path) -> Value {
    let mut entries = Map::new();
    for artifact in artifacts {
        let name = artifact
            .path
            .strip_prefix(base)
            .unwrap_or(&artifact.path)
            .to_string_lossy()
            .replace('\\', "/");
        entries.insert(name, Value::String(compute_etag(&artifact.contents)));
    }
    let entries = Value::Object(entries);
    let etag = compute_etag(&entries.to_string());

    let mut map = Map::new();
    map.insert("artifacts".to_string(), entries);
    map.insert("etag".to_string(), Value::String(etag));
    map.insert(
        "hbpress".to_string(),
        Value::String(MANIFEST_VERSION.to_string()),
    );
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn etag_is_hex_sha256() {
        assert_eq!(
            compute_etag(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn manifest_uses_relative_sorted_paths() {
        let base = PathBuf::from("/work");
        let artifacts = [
            Artifact::new(&base.join("out/safety.rst"), "b".into()),
            Artifact::new(&base.join("out/params.tex"), "a".into()),
        ];
        let manifest = build_manifest(&artifacts, &base);
        let names: Vec<&String> = manifest["artifacts"].as_object().unwrap().keys().collect();
        assert_eq!(names, vec!["out/params.tex", "out/safety.rst"]);
        assert_eq!(manifest["artifacts"]["out/params.tex"], compute_etag("a"));
        assert_eq!(manifest["hbpress"], "1.0");
    }

    #[test]
    fn manifest_etag_tracks_contents() {
        let base = PathBuf::from("/work");
        let a = build_manifest(&[Artifact::new(&base.join("p.tex"), "x".into())], &base);
        let b = build_manifest(&[Artifact::new(&base.join("p.tex"), "y".into())], &base);
        assert_ne!(a["etag"], b["etag"]);
    }
}
