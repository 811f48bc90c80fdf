//! Provident CLI - splits a package repository index into provider shards

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod error;
mod exit_codes;

#[derive(Parser)]
#[command(name = "provident")]
#[command(author = "Provident Contributors")]
#[command(version)]
#[command(about = "Splits a package repository index into provider shards", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show pipeline logs on stderr (RUST_LOG overrides the level)
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Split the published index into per-package provider shards
    Build {
        /// Build configuration file
        #[arg(default_value = "./provident.json")]
        file: PathBuf,

        /// Repository location (defaults to output-dir from the config)
        output_dir: Option<PathBuf>,
    },

    /// Restore the backed-up root index and discard the shard tree
    Unwind {
        /// Build configuration file
        #[arg(default_value = "./provident.json")]
        file: PathBuf,

        /// Repository location (defaults to output-dir from the config)
        output_dir: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    // Default is "off": the terminal belongs to the status lines on stdout.
    // --verbose honours RUST_LOG when set, otherwise shows info-level events.
    let filter = if verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("off")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Build { file, output_dir } => commands::build::run(&file, output_dir.as_deref()),
        Commands::Unwind { file, output_dir } => {
            commands::unwind::run(&file, output_dir.as_deref())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err.exit_code();
            eprintln!("{:?}", miette::Report::new(err));
            ExitCode::from(code as u8)
        }
    }
}
