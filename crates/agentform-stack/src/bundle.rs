//! Handler bundle staging.
//!
//! Walks the bundle directory, filters excluded paths, and digests the
//! remaining files into a stable content hash, so identical bundles map
//! to identical code references across evaluations. The bundle's format
//! and build are an external concern; staging never inspects contents
//! beyond hashing them.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::debug;
use walkdir::WalkDir;

use agentform_model::CodeRef;

use crate::config::CodeConfig;

/// Stage the handler bundle: digest its contents honoring excludes.
///
/// Fails when the bundle directory does not exist; a deployment must not
/// reference code that was never there.
pub fn stage(config: &CodeConfig) -> anyhow::Result<CodeRef> {
    let root = Path::new(&config.path);
    if !root.is_dir() {
        anyhow::bail!("bundle directory not found: {}", config.path);
    }

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry.path().strip_prefix(root)?.to_path_buf();
        if excluded(&rel, &config.exclude) {
            continue;
        }
        files.push(rel);
    }
    // Walk order is filesystem-dependent; the digest must not be.
    files.sort();

    let mut hasher = Sha256::new();
    for rel in &files {
        hasher.update(rel.to_string_lossy().as_bytes());
        hasher.update([0u8]);
        hasher.update(std::fs::read(root.join(rel))?);
        hasher.update([0u8]);
    }
    let digest = hex::encode(hasher.finalize());

    debug!(
        bundle = %config.path,
        files = files.len(),
        digest = %digest,
        "staged handler bundle"
    );

    Ok(CodeRef {
        bundle: config.path.clone(),
        digest: Some(digest),
    })
}

/// A path is excluded when any component equals a bare pattern, or its
/// extension matches a `*.ext` pattern.
fn excluded(rel: &Path, patterns: &[String]) -> bool {
    for pattern in patterns {
        if let Some(ext) = pattern.strip_prefix("*.") {
            if rel
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e == ext)
            {
                return true;
            }
        } else if rel
            .components()
            .any(|c| c.as_os_str().to_str().is_some_and(|s| s == pattern))
        {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, rel: &str, contents: &str) {
        let path = dir.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    fn config_for(dir: &Path) -> CodeConfig {
        CodeConfig {
            path: dir.to_string_lossy().into_owned(),
            ..CodeConfig::default()
        }
    }

    #[test]
    fn digest_is_stable_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "handlers/simulate.py", "def handle(): ...");
        write(dir.path(), "handlers/status.py", "def handle(): ...");

        let config = config_for(dir.path());
        let first = stage(&config).unwrap();
        let second = stage(&config).unwrap();

        assert_eq!(first.digest, second.digest);
        assert_eq!(first.digest.as_ref().unwrap().len(), 64);
    }

    #[test]
    fn digest_changes_with_contents() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.txt", "one");
        let config = config_for(dir.path());
        let before = stage(&config).unwrap();

        write(dir.path(), "a.txt", "two");
        let after = stage(&config).unwrap();

        assert_ne!(before.digest, after.digest);
    }

    #[test]
    fn excluded_paths_do_not_affect_digest() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.txt", "one");
        let config = config_for(dir.path());
        let before = stage(&config).unwrap();

        write(dir.path(), "__pycache__/junk.bin", "garbage");
        write(dir.path(), "module.pyc", "garbage");
        let after = stage(&config).unwrap();

        assert_eq!(before.digest, after.digest);
    }

    #[test]
    fn missing_bundle_directory_is_an_error() {
        let config = CodeConfig {
            path: "does/not/exist".to_string(),
            ..CodeConfig::default()
        };
        assert!(stage(&config).is_err());
    }

    #[test]
    fn extension_patterns_only_match_extensions() {
        let rel = Path::new("pyc/data.txt");
        assert!(!excluded(rel, &["*.pyc".to_string()]));
        assert!(excluded(Path::new("data.pyc"), &["*.pyc".to_string()]));
    }
}
