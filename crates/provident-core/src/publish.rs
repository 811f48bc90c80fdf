//! Provider manifest and root index publishing
//!
//! The provider manifest is content-addressed like any shard. The root index
//! is not: its name (`packages.json`) must stay stable for consumers, so it
//! is written in place after the previous root has been copied aside as the
//! `*-all.json` backup. The backup is the safety net for an unwind and must
//! succeed before the root is touched.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

use crate::error::{Result, SplitError};
use crate::store::{self, StoredFile};

/// Reference to a content-addressed file by its digest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sha256Ref {
    pub sha256: String,
}

#[derive(Debug, Serialize)]
struct ProviderManifest<'a> {
    providers: IndexMap<&'a str, Sha256Ref>,
}

#[derive(Debug, Serialize)]
struct RootIndex {
    /// Always empty once sharded; consumers follow providers-url instead
    packages: IndexMap<String, serde_json::Value>,

    #[serde(rename = "providers-url")]
    providers_url: String,

    #[serde(rename = "provider-includes")]
    provider_includes: IndexMap<String, Sha256Ref>,
}

/// Persist the provider-active manifest under `build_dir`
pub fn write_provider_manifest(
    build_dir: &Path,
    providers: &IndexMap<String, String>,
) -> Result<StoredFile> {
    let manifest = ProviderManifest {
        providers: providers
            .iter()
            .map(|(name, sha256)| {
                (
                    name.as_str(),
                    Sha256Ref {
                        sha256: sha256.clone(),
                    },
                )
            })
            .collect(),
    };

    store::persist(&build_dir.join("provider-active"), &manifest)
}

/// Back up the current root index, then overwrite it with the sharded shape
///
/// The new root carries no inline packages: a `providers-url` template rooted
/// at the repository's public base URL and a single `provider-includes` entry
/// naming the provider manifest by hash are all a consumer needs.
pub fn publish_root(root: &Path, homepage: &str, manifest_sha256: &str) -> Result<()> {
    let stem = root
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("packages");
    let backup = root.with_file_name(format!("{stem}-all.json"));
    std::fs::copy(root, &backup).map_err(|e| SplitError::io(root, e))?;
    tracing::debug!(backup = %backup.display(), "backed up root index");

    let index = RootIndex {
        packages: IndexMap::new(),
        providers_url: format!("{}/p/%package%$%hash%.json", strip_origin(homepage)),
        provider_includes: IndexMap::from([(
            format!("p/provider-active${manifest_sha256}.json"),
            Sha256Ref {
                sha256: manifest_sha256.to_string(),
            },
        )]),
    };

    let bytes = serde_json::to_vec_pretty(&index)
        .map_err(|e| SplitError::parse(root, e.to_string()))?;
    std::fs::write(root, bytes).map_err(|e| SplitError::io(root, e))
}

/// Strip scheme and host from an absolute URL, keeping only its path
///
/// A value that does not parse as an absolute URL passes through unchanged,
/// so a repository may configure a bare path as its homepage.
fn strip_origin(homepage: &str) -> String {
    match Url::parse(homepage) {
        Ok(url) if url.has_host() => url.path().trim_end_matches('/').to_string(),
        _ => homepage.trim_end_matches('/').to_string(),
    }
}
