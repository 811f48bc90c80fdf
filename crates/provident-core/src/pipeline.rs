//! The split pipeline: load, stamp, shard, publish, swap
//!
//! Stages run strictly in dependency order — shards, then the provider
//! manifest, then the root backup, then the root index, then the tree swap —
//! so nothing downstream is written before its dependency is durably on
//! disk. A crash at any point leaves either the old tree fully intact or the
//! new tree fully written but not yet swapped. The window between the root
//! index write and the tree swap is a known transient inconsistency; it is
//! documented, not compensated.
//!
//! Runs against the same output directory must be serialized by the caller;
//! two simultaneous runs race on the same `_p/` build path.

use std::path::Path;

use crate::config::BuildConfig;
use crate::error::{Result, SplitError};
use crate::index::{self, LoadedIndex};
use crate::publish;
use crate::shard;

/// Final report of one pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitOutcome {
    /// The root already pointed at provider includes; nothing was written
    AlreadyOptimized,
    /// The repository was split and the new tree swapped into place
    Completed { packages: usize, versions: u64 },
}

/// Runs the whole splitting pipeline against one output directory
pub struct Splitter {
    config: BuildConfig,
}

impl Splitter {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Split the repository published under `output_dir`
    ///
    /// Re-running against an already-split repository is detected up front
    /// and reported as [`SplitOutcome::AlreadyOptimized`] without touching
    /// anything; applying the pipeline twice would double-nest the shards.
    pub fn run(&self, output_dir: &Path) -> Result<SplitOutcome> {
        let root = output_dir.join("packages.json");
        let build_dir = output_dir.join("_p");

        let mut packages = match index::load_published(&root)? {
            LoadedIndex::AlreadyOptimized => {
                tracing::info!(root = %root.display(), "repository already optimized");
                return Ok(SplitOutcome::AlreadyOptimized);
            }
            LoadedIndex::Packages(packages) => packages,
        };

        let versions = shard::assign_uids(&mut packages);
        tracing::info!(
            packages = packages.len(),
            versions,
            "writing package shards"
        );
        let providers = shard::write_shards(&packages, &build_dir)?;

        tracing::info!("writing provider manifest");
        let manifest = publish::write_provider_manifest(&build_dir, &providers)?;

        tracing::info!(sha256 = %manifest.sha256, "publishing root index");
        publish::publish_root(&root, &self.config.homepage, &manifest.sha256)?;

        swap_tree(output_dir)?;

        Ok(SplitOutcome::Completed {
            packages: packages.len(),
            versions,
        })
    }
}

/// Replace the live `p/` tree with the freshly built `_p/`
fn swap_tree(output_dir: &Path) -> Result<()> {
    let live = output_dir.join("p");
    let build = output_dir.join("_p");

    remove_dir_if_present(&live)?;
    std::fs::rename(&build, &live).map_err(|e| SplitError::io(&build, e))
}

/// Companion operation: restore the backed-up root and discard the shards
///
/// Copies `packages-all.json` back over `packages.json` and removes both the
/// live `p/` tree and any leftover `_p/` build tree. The backup itself is
/// kept, so an unwind can be repeated.
pub fn unwind(output_dir: &Path) -> Result<()> {
    let root = output_dir.join("packages.json");
    let backup = output_dir.join("packages-all.json");

    if !backup.exists() {
        return Err(SplitError::not_found(&backup));
    }
    std::fs::copy(&backup, &root).map_err(|e| SplitError::io(&backup, e))?;
    tracing::info!(root = %root.display(), "restored root index from backup");

    remove_dir_if_present(&output_dir.join("p"))?;
    remove_dir_if_present(&output_dir.join("_p"))
}

fn remove_dir_if_present(dir: &Path) -> Result<()> {
    match std::fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(SplitError::io(dir, e)),
    }
}
