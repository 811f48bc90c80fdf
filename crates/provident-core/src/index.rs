//! Aggregated index model and loader
//!
//! The published root index comes in two shapes:
//!
//! - **Legacy**: the root carries inline `packages` plus an `includes`
//!   mapping of relative file name to metadata, where each included file
//!   holds its own `packages` block. The loader unions all of them into one
//!   [`PackageMap`].
//! - **Already sharded**: the root has a non-empty `provider-includes`. The
//!   pipeline must not run again on such a repository, so the loader reports
//!   [`LoadedIndex::AlreadyOptimized`] and nothing is touched.
//!
//! All maps preserve insertion order end to end. Version entries are kept as
//! raw JSON objects because the pipeline never interprets their metadata
//! fields, with one exception: the `uid` field, which the shard writer owns.

use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;

use crate::error::{Result, SplitError};

/// Arbitrary metadata fields of one package version. Field order is preserved.
pub type VersionEntry = serde_json::Map<String, Value>;

/// Version label to entry, in the order the index listed them.
pub type VersionMap = IndexMap<String, VersionEntry>;

/// Package name to version map, in the order the index listed them.
pub type PackageMap = IndexMap<String, VersionMap>;

/// Outcome of loading the published root index
#[derive(Debug)]
pub enum LoadedIndex {
    /// Aggregated package data ready to be split
    Packages(PackageMap),
    /// The root already points at provider includes; the run is a no-op
    AlreadyOptimized,
}

#[derive(Debug, Deserialize)]
struct PublishedRoot {
    #[serde(default)]
    packages: PackageMap,

    #[serde(default)]
    includes: IndexMap<String, Value>,

    #[serde(default, rename = "provider-includes")]
    provider_includes: IndexMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct IncludeFile {
    #[serde(default)]
    packages: PackageMap,
}

/// Read and deserialize a JSON file
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(SplitError::not_found(path));
        }
        Err(e) => return Err(SplitError::io(path, e)),
    };

    serde_json::from_slice(&bytes).map_err(|e| SplitError::parse(path, e.to_string()))
}

/// Load the currently published root index at `root`
///
/// Includes are resolved relative to the root's directory and merged left to
/// right with first-wins semantics: a package name already present is never
/// overridden by a later include.
pub fn load_published(root: &Path) -> Result<LoadedIndex> {
    let published: PublishedRoot = read_json(root)?;

    if !published.provider_includes.is_empty() {
        return Ok(LoadedIndex::AlreadyOptimized);
    }

    let dir = root.parent().unwrap_or_else(|| Path::new("."));
    let mut packages = published.packages;

    for include in published.includes.keys() {
        let included: IncludeFile = read_json(&dir.join(include))?;
        merge_first_wins(&mut packages, included.packages);
    }

    Ok(LoadedIndex::Packages(packages))
}

/// Ordered union where names already present keep their existing data
///
/// Deliberately not `IndexMap::extend`, which is last-wins.
fn merge_first_wins(into: &mut PackageMap, from: PackageMap) {
    for (name, versions) in from {
        into.entry(name).or_insert(versions);
    }
}
