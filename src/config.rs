use crate::error::{Result, SyncError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Defaults read from `config.toml`. Every key is optional and command-line
/// flags take precedence.
///
/// ```toml
/// dry_run = false
/// quiet = false
/// json = false
/// verbose = 1
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub dry_run: Option<bool>,
    pub quiet: Option<bool>,
    pub json: Option<bool>,
    pub verbose: Option<u8>,
}

impl Config {
    /// Standard config location: `<config dir>/sync-folders/config.toml`
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            SyncError::Config("Cannot determine config directory (HOME not set)".to_string())
        })?;
        Ok(dir.join("sync-folders").join("config.toml"))
    }

    /// Load from `explicit` if given (it must exist), otherwise from the
    /// standard location if a file is there.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        let path = match Self::config_path() {
            Ok(path) => path,
            Err(e) => {
                tracing::debug!("Skipping config file: {}", e);
                return Ok(Self::default());
            }
        };

        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SyncError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::parse(&content)
            .map_err(|e| SyncError::Config(format!("{}: {}", path.display(), e)))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
