//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

#![allow(dead_code)]

/// Success - the run completed, or the repository was already optimized
pub const SUCCESS: i32 = 0;

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Configuration error - homepage or output dir unresolved
pub const CONFIG_ERROR: i32 = 2;

/// Parse error - malformed JSON in the root index, an include, or the config
pub const PARSE_ERROR: i32 = 3;

/// Not found - missing root index, include, config, or backup file
pub const NOT_FOUND_ERROR: i32 = 4;

/// IO error - write, rename, copy, or directory-creation failure
pub const IO_ERROR: i32 = 5;

/// Usage error - invalid arguments or options (following sysexits.h convention)
pub const USAGE_ERROR: i32 = 64;
