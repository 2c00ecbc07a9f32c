//! Configuration loading for provider-mirror.
//!
//! Configuration is loaded from a TOML file (default: `provider-mirror.toml`
//! when it exists). Every field has a default, so the file is optional.

use mirror_core::MirrorLayout;
use mirror_sync::DEFAULT_FINGERPRINT_PROGRAM;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "provider-mirror.toml";

/// Root configuration for provider-mirror.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Object store configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Fingerprint procedure configuration.
    #[serde(default)]
    pub fingerprint: FingerprintConfig,
    /// Mirror configuration.
    #[serde(default)]
    pub mirror: MirrorSection,
}

/// Object store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Directory holding one subdirectory per bucket (default: `.`).
    #[serde(default = "default_store_root")]
    pub root: PathBuf,
}

/// Fingerprint procedure configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FingerprintConfig {
    /// Program to run (default: `dirhasher`).
    #[serde(default = "default_fingerprint_program")]
    pub program: String,
    /// Arguments placed before the archive path.
    #[serde(default)]
    pub args: Vec<String>,
}

/// Mirror configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MirrorSection {
    /// Layout for both commands. Unset: flat for `local`, per-version for `remote`.
    pub layout: Option<MirrorLayout>,
}

// Default value functions
fn default_store_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_fingerprint_program() -> String {
    DEFAULT_FINGERPRINT_PROGRAM.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: default_store_root(),
        }
    }
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            program: default_fingerprint_program(),
            args: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load `path` if given, else [`DEFAULT_CONFIG_FILE`] if it exists, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Failed to parse configuration file.
    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.store.root, PathBuf::from("."));
        assert_eq!(config.fingerprint.program, "dirhasher");
        assert!(config.fingerprint.args.is_empty());
        assert_eq!(config.mirror.layout, None);
    }

    #[test]
    fn config_from_toml_string() {
        let toml = r#"
[store]
root = "/srv/buckets"

[fingerprint]
program = "/usr/local/bin/dirhasher"
args = ["--algo", "h1"]

[mirror]
layout = "per-version"
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.store.root, PathBuf::from("/srv/buckets"));
        assert_eq!(config.fingerprint.program, "/usr/local/bin/dirhasher");
        assert_eq!(config.fingerprint.args, vec!["--algo", "h1"]);
        assert_eq!(config.mirror.layout, Some(MirrorLayout::PerVersion));
    }

    #[test]
    fn config_missing_sections_use_defaults() {
        let config: Config = toml::from_str("[store]\nroot = \"data\"\n").unwrap();
        assert_eq!(config.store.root, PathBuf::from("data"));
        assert_eq!(config.fingerprint.program, "dirhasher");
        assert_eq!(config.mirror.layout, None);
    }

    #[test]
    fn unknown_layout_is_rejected() {
        assert!(toml::from_str::<Config>("[mirror]\nlayout = \"nested\"\n").is_err());
    }

    #[test]
    fn from_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
        assert!(err.to_string().contains("missing.toml"));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[store\n").unwrap();
        assert!(matches!(Config::from_file(&bad), Err(ConfigError::ParseError { .. })));
    }
}
