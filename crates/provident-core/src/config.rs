//! Build configuration file
//!
//! A small JSON document describing the repository being split: the public
//! base URL consumers use (`homepage`) and optionally where the built tree
//! lives (`output-dir`). The output dir given on the command line always
//! wins over the configured one.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Result, SplitError};
use crate::index::read_json;

/// Parsed build configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BuildConfig {
    /// Public base URL of the repository; providers-url is derived from it
    pub homepage: String,

    /// Default output directory, overridable per invocation
    #[serde(default, rename = "output-dir")]
    pub output_dir: Option<PathBuf>,
}

impl BuildConfig {
    /// Load the configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let mut config: Self = read_json(path)?;
        config.homepage = config.homepage.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Resolve the effective output directory
    pub fn resolve_output_dir(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.output_dir.clone())
            .ok_or_else(|| SplitError::Config {
                message: "output dir must be given on the command line or configured as output-dir"
                    .to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_trims_trailing_slash() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("provident.json");
        std::fs::write(
            &path,
            r#"{"homepage": "https://repo.example.org/", "output-dir": "web"}"#,
        )
        .unwrap();

        let config = BuildConfig::load(&path).unwrap();
        assert_eq!(config.homepage, "https://repo.example.org");
        assert_eq!(config.output_dir, Some(PathBuf::from("web")));
    }

    #[test]
    fn test_missing_config_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = BuildConfig::load(&temp.path().join("provident.json")).unwrap_err();
        assert!(matches!(err, SplitError::NotFound { .. }));
    }

    #[test]
    fn test_missing_homepage_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("provident.json");
        std::fs::write(&path, r#"{"output-dir": "web"}"#).unwrap();

        let err = BuildConfig::load(&path).unwrap_err();
        assert!(matches!(err, SplitError::Parse { .. }));
    }

    #[test]
    fn test_cli_override_wins() {
        let config = BuildConfig {
            homepage: "https://repo.example.org".to_string(),
            output_dir: Some(PathBuf::from("configured")),
        };

        let resolved = config
            .resolve_output_dir(Some(Path::new("override")))
            .unwrap();
        assert_eq!(resolved, PathBuf::from("override"));
    }

    #[test]
    fn test_unresolved_output_dir_is_config_error() {
        let config = BuildConfig {
            homepage: "https://repo.example.org".to_string(),
            output_dir: None,
        };

        let err = config.resolve_output_dir(None).unwrap_err();
        assert!(matches!(err, SplitError::Config { .. }));
    }
}
