//! Shard assembly and writing
//!
//! A shard is one persisted document per package, holding the package's own
//! version map plus the version maps of every package replacing it. Before
//! any shard is written, every version entry in the whole repository gets a
//! `uid` from a single counter, so identifiers are stable and non-overlapping
//! regardless of how many packages end up merged into any one shard.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

use crate::error::Result;
use crate::index::{PackageMap, VersionMap};
use crate::replace::find_replacers;
use crate::store;

#[derive(Debug, Serialize)]
struct ShardDoc<'a> {
    packages: IndexMap<&'a str, &'a VersionMap>,
}

/// Stamp every version entry with a `uid` and return how many were stamped
///
/// Packages are visited in map order, versions in map order within each
/// package; the counter starts at 0, so the assigned values are exactly
/// `0..N` for `N` entries. The counter is explicit state of this pass, not a
/// process-wide global.
pub fn assign_uids(packages: &mut PackageMap) -> u64 {
    let mut uid = 0u64;

    for versions in packages.values_mut() {
        for entry in versions.values_mut() {
            entry.insert("uid".to_string(), Value::from(uid));
            uid += 1;
        }
    }

    uid
}

/// Write one content-addressed shard per package under `build_dir`
///
/// Each shard merges the replacer set with the target package; the target is
/// inserted last so its own version map wins a name collision. Returns the
/// accumulated `package name -> shard sha256` mapping for the provider
/// manifest. The first failed write aborts the whole run: a manifest
/// referencing a missing shard would corrupt the published tree.
pub fn write_shards(packages: &PackageMap, build_dir: &Path) -> Result<IndexMap<String, String>> {
    let mut providers = IndexMap::new();

    for (name, versions) in packages {
        let replacers = find_replacers(packages, name);

        let mut merged: IndexMap<&str, &VersionMap> = replacers
            .iter()
            .map(|(replacer, replacer_versions)| (replacer.as_str(), replacer_versions))
            .collect();
        merged.insert(name.as_str(), versions);

        let stored = store::persist(&build_dir.join(name), &ShardDoc { packages: merged })?;
        tracing::debug!(package = name.as_str(), sha256 = %stored.sha256, "wrote shard");

        providers.insert(name.clone(), stored.sha256);
    }

    Ok(providers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn package_map(raw: Value) -> PackageMap {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn test_uids_are_contiguous_across_packages() {
        let mut packages = package_map(json!({
            "a/a": {"1.0": {}, "2.0": {}},
            "b/b": {"1.0": {}},
        }));

        let count = assign_uids(&mut packages);
        assert_eq!(count, 3);

        let mut uids: Vec<u64> = packages
            .values()
            .flat_map(|versions| versions.values())
            .map(|entry| entry["uid"].as_u64().unwrap())
            .collect();
        uids.sort_unstable();
        assert_eq!(uids, vec![0, 1, 2]);
    }

    #[test]
    fn test_uid_assignment_follows_map_order() {
        let mut packages = package_map(json!({
            "b/b": {"2.0": {}, "1.0": {}},
            "a/a": {"1.0": {}},
        }));

        assign_uids(&mut packages);

        assert_eq!(packages["b/b"]["2.0"]["uid"], json!(0));
        assert_eq!(packages["b/b"]["1.0"]["uid"], json!(1));
        assert_eq!(packages["a/a"]["1.0"]["uid"], json!(2));
    }

    #[test]
    fn test_empty_map_assigns_nothing() {
        let mut packages = PackageMap::new();
        assert_eq!(assign_uids(&mut packages), 0);
    }

    #[test]
    fn test_write_shards_one_file_per_package() {
        let temp = TempDir::new().unwrap();
        let packages = package_map(json!({
            "x/y": {"1.0": {"uid": 0}},
            "z/z": {"1.0": {"uid": 1}},
        }));

        let providers = write_shards(&packages, temp.path()).unwrap();

        assert_eq!(providers.len(), 2);
        for (name, sha256) in &providers {
            let path = temp.path().join(format!("{name}${sha256}.json"));
            assert!(path.exists(), "missing shard for {name}");
        }
    }

    #[test]
    fn test_replaced_package_shard_embeds_replacer() {
        let temp = TempDir::new().unwrap();
        let packages = package_map(json!({
            "a/a": {"1.0": {"uid": 0, "replace": {"b/b": "*"}}},
            "b/b": {"1.0": {"uid": 1}},
        }));

        let providers = write_shards(&packages, temp.path()).unwrap();

        let shard_path = temp.path().join(format!("b/b${}.json", providers["b/b"]));
        let shard: Value = serde_json::from_slice(&std::fs::read(shard_path).unwrap()).unwrap();

        let names: Vec<_> = shard["packages"].as_object().unwrap().keys().collect();
        assert_eq!(names, vec!["a/a", "b/b"]);
    }

    #[test]
    fn test_replacer_own_shard_has_no_extra_packages() {
        let temp = TempDir::new().unwrap();
        let packages = package_map(json!({
            "a/a": {"1.0": {"uid": 0, "replace": {"b/b": "*"}}},
            "b/b": {"1.0": {"uid": 1}},
        }));

        let providers = write_shards(&packages, temp.path()).unwrap();

        let shard_path = temp.path().join(format!("a/a${}.json", providers["a/a"]));
        let shard: Value = serde_json::from_slice(&std::fs::read(shard_path).unwrap()).unwrap();

        let names: Vec<_> = shard["packages"].as_object().unwrap().keys().collect();
        assert_eq!(names, vec!["a/a"]);
    }
}
