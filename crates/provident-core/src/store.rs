//! Content-addressed JSON persistence
//!
//! A stored document's final file name embeds the SHA-256 of its own bytes:
//! `<basename>$<hash>.json`. Such a file is immutable once named; new content
//! always produces a new name, never an in-place overwrite. The hash is
//! computed over the exact bytes written to disk, after pretty-printing, so
//! re-hashing a published file always reproduces the name it carries.
//!
//! Writes go through a bare temporary path first and are renamed into their
//! final name afterwards, so a crash mid-write can never leave a half-written
//! file under a content-addressed name.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

use crate::error::{Result, SplitError};

/// A persisted file whose name embeds the SHA-256 of its contents
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Final on-disk location, `<prefix>$<sha256>.json`
    pub path: PathBuf,
    /// Lowercase hex digest of the file's bytes
    pub sha256: String,
}

/// Serialize `document` to pretty-printed JSON and persist it content-addressed
///
/// Missing parent directories are created. If the final name already exists
/// with identical bytes the call is a no-op (safe re-run); if it exists with
/// different bytes the call fails rather than silently colliding.
pub fn persist<T: Serialize>(prefix: &Path, document: &T) -> Result<StoredFile> {
    if let Some(parent) = prefix.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| SplitError::io(parent, e))?;
        }
    }

    let bytes = serde_json::to_vec_pretty(document)
        .map_err(|e| SplitError::parse(prefix, e.to_string()))?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let sha256 = hex::encode(hasher.finalize());

    let final_path = content_path(prefix, &sha256);

    std::fs::write(prefix, &bytes).map_err(|e| SplitError::io(prefix, e))?;

    if final_path.exists() {
        let existing = std::fs::read(&final_path).map_err(|e| SplitError::io(&final_path, e))?;
        if existing != bytes {
            let _ = std::fs::remove_file(prefix);
            return Err(SplitError::Collision {
                path: final_path.display().to_string(),
            });
        }
        // Same bytes already published under this name; drop the temp copy.
        std::fs::remove_file(prefix).map_err(|e| SplitError::io(prefix, e))?;
    } else {
        std::fs::rename(prefix, &final_path).map_err(|e| SplitError::io(prefix, e))?;
    }

    Ok(StoredFile {
        path: final_path,
        sha256,
    })
}

fn content_path(prefix: &Path, sha256: &str) -> PathBuf {
    let mut name = prefix
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!("${sha256}.json"));
    prefix.with_file_name(name)
}
