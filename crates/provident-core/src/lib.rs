//! Provident core — splits a monolithic package-repository index into
//! per-package, content-addressed shards behind a provider indirection
//!
//! A repository that publishes one ever-growing `packages.json` forces every
//! consumer to download the whole index for every update. This crate rewrites
//! such a repository in place into the sharded layout:
//!
//! - `p/<package>$<sha256>.json` — one shard per package, carrying the
//!   package's versions plus every package that replaces it,
//! - `p/provider-active$<sha256>.json` — the manifest mapping package names
//!   to shard hashes,
//! - `packages.json` — a slim root with a `providers-url` template and a
//!   single `provider-includes` entry,
//! - `packages-all.json` — backup of the previous root, enabling [`unwind`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use provident_core::{BuildConfig, Splitter, SplitOutcome};
//! use std::path::Path;
//!
//! # fn example() -> provident_core::Result<()> {
//! let config = BuildConfig::load(Path::new("provident.json"))?;
//! let output_dir = config.resolve_output_dir(None)?;
//!
//! match Splitter::new(config).run(&output_dir)? {
//!     SplitOutcome::Completed { packages, .. } => println!("split {packages} packages"),
//!     SplitOutcome::AlreadyOptimized => println!("nothing to do"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod index;
pub mod pipeline;
pub mod publish;
pub mod replace;
pub mod shard;
pub mod store;

// Re-exports for convenience
pub use config::BuildConfig;
pub use error::{Result, SplitError};
pub use index::{LoadedIndex, PackageMap, VersionEntry, VersionMap};
pub use pipeline::{SplitOutcome, Splitter, unwind};
pub use store::StoredFile;
