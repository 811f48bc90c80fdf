//! Build command - split the published index into provider shards

use console::style;
use provident_core::{BuildConfig, SplitOutcome, Splitter};
use std::path::Path;

use crate::error::Result;

/// Run the build command
pub fn run(file: &Path, output_dir: Option<&Path>) -> Result<()> {
    let config = BuildConfig::load(file)?;
    let output_dir = config.resolve_output_dir(output_dir)?;

    println!(
        "{} Splitting repository at {}",
        style("→").blue().bold(),
        style(output_dir.display()).cyan()
    );

    match Splitter::new(config).run(&output_dir)? {
        SplitOutcome::AlreadyOptimized => {
            println!(
                "{} Repository already optimized",
                style("✓").green().bold()
            );
        }
        SplitOutcome::Completed { packages, versions } => {
            println!(
                "{} Split {} package(s), {} version(s) into provider shards",
                style("✓").green().bold(),
                style(packages).yellow(),
                style(versions).yellow()
            );
        }
    }

    Ok(())
}
