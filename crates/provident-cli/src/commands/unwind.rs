//! Unwind command - restore the pre-split root index

use console::style;
use provident_core::{BuildConfig, unwind};
use std::path::Path;

use crate::error::Result;

/// Run the unwind command
pub fn run(file: &Path, output_dir: Option<&Path>) -> Result<()> {
    let config = BuildConfig::load(file)?;
    let output_dir = config.resolve_output_dir(output_dir)?;

    unwind(&output_dir)?;

    println!(
        "{} Restored {} from its backup and removed the shard tree",
        style("✓").green().bold(),
        style(output_dir.join("packages.json").display()).cyan()
    );

    Ok(())
}
