//! Replace-relationship resolution
//!
//! A version entry may declare a `replace` object mapping replaced package
//! names to version constraints. A package whose shard a client resolves must
//! also carry every package replacing it, otherwise the client would never
//! see the replacement metadata.

use serde_json::Value;

use crate::index::PackageMap;

/// Collect every package with a version entry that replaces `target`
///
/// A matching package is included with all of its versions, and at most once:
/// scanning its versions stops at the first match. The result is empty when
/// nothing replaces `target`.
pub fn find_replacers(packages: &PackageMap, target: &str) -> PackageMap {
    let mut replacers = PackageMap::new();

    for (name, versions) in packages {
        for entry in versions.values() {
            let replaces_target = entry
                .get("replace")
                .and_then(Value::as_object)
                .is_some_and(|replace| replace.contains_key(target));

            if replaces_target {
                replacers.insert(name.clone(), versions.clone());
                break;
            }
        }
    }

    replacers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::VersionMap;
    use serde_json::json;

    fn versions(entries: &[(&str, Value)]) -> VersionMap {
        entries
            .iter()
            .map(|(label, entry)| {
                (
                    label.to_string(),
                    entry.as_object().unwrap().clone(),
                )
            })
            .collect()
    }

    fn sample() -> PackageMap {
        let mut packages = PackageMap::new();
        packages.insert(
            "a/a".to_string(),
            versions(&[
                ("1.0", json!({"replace": {"b/b": "*"}})),
                ("2.0", json!({"replace": {"b/b": "*", "c/c": "1.*"}})),
            ]),
        );
        packages.insert("b/b".to_string(), versions(&[("1.0", json!({}))]));
        packages.insert(
            "c/c".to_string(),
            versions(&[("1.0", json!({"replace": {}}))]),
        );
        packages
    }

    #[test]
    fn test_replacer_carries_all_its_versions() {
        let result = find_replacers(&sample(), "b/b");
        assert_eq!(result.len(), 1);
        assert_eq!(result["a/a"].len(), 2);
    }

    #[test]
    fn test_package_included_at_most_once() {
        // Both versions of a/a replace b/b; the package must still appear once.
        let result = find_replacers(&sample(), "b/b");
        assert_eq!(result.keys().filter(|k| *k == "a/a").count(), 1);
    }

    #[test]
    fn test_no_match_returns_empty() {
        let result = find_replacers(&sample(), "d/d");
        assert!(result.is_empty());
    }

    #[test]
    fn test_empty_replace_object_does_not_match() {
        // c/c has "replace": {} which mentions nobody.
        let result = find_replacers(&sample(), "c/c");
        assert!(result.is_empty());
    }

    #[test]
    fn test_result_independent_of_key_order() {
        let forward = sample();
        let mut reversed = PackageMap::new();
        for (name, versions) in forward.iter().rev() {
            reversed.insert(name.clone(), versions.clone());
        }

        let from_forward = find_replacers(&forward, "b/b");
        let from_reversed = find_replacers(&reversed, "b/b");

        let mut a: Vec<_> = from_forward.keys().cloned().collect();
        let mut b: Vec<_> = from_reversed.keys().cloned().collect();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }

    #[test]
    fn test_deterministic_across_calls() {
        let packages = sample();
        let first = find_replacers(&packages, "b/b");
        let second = find_replacers(&packages, "b/b");
        assert_eq!(first, second);
    }
}
