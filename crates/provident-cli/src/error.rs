//! CLI error types with exit code handling
//!
//! Maps core pipeline errors onto user-facing diagnostics and the exit codes
//! callers rely on.

use miette::Diagnostic;
use provident_core::SplitError;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Homepage or output directory unresolved
    #[error("{message}")]
    #[diagnostic(code(provident::cli::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Malformed JSON in the root index, an include, or the config file
    #[error("{message}")]
    #[diagnostic(code(provident::cli::parse))]
    Parse { message: String },

    /// Missing root index, include, config, or backup file
    #[error("{message}")]
    #[diagnostic(code(provident::cli::not_found))]
    NotFound {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Write, rename, copy, or directory-creation failure
    #[error("{message}")]
    #[diagnostic(code(provident::cli::io))]
    Io { message: String },

    /// Wrapped error for passthrough
    #[error("{message}")]
    #[diagnostic(code(provident::cli::error))]
    Other { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config { .. } => exit_codes::CONFIG_ERROR,
            CliError::Parse { .. } => exit_codes::PARSE_ERROR,
            CliError::NotFound { .. } => exit_codes::NOT_FOUND_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Other { .. } => exit_codes::ERROR,
        }
    }
}

impl From<SplitError> for CliError {
    fn from(err: SplitError) -> Self {
        let message = err.to_string();
        match err {
            SplitError::NotFound { .. } => CliError::NotFound {
                message,
                help: None,
            },
            SplitError::Parse { .. } => CliError::Parse { message },
            SplitError::Io { .. } | SplitError::Collision { .. } => CliError::Io { message },
            SplitError::Config { .. } => CliError::Config {
                message,
                help: Some(
                    "pass the output dir as the second argument or set output-dir in the config file"
                        .to_string(),
                ),
            },
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
