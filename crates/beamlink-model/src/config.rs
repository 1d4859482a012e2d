//! Module configuration (beamlink.toml)
//!
//! ```toml
//! name = "beamlink"
//! doc = "beamline apparatus"
//! data_dir = "/opt/beamlink/data"
//! ```
//!
//! Every key is optional. `BEAMLINK_DATA_DIR` overrides `data_dir`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the configured data directory
pub const DATA_DIR_ENV: &str = "BEAMLINK_DATA_DIR";

/// Errors that can occur while loading a module configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Validation error
    #[error("Invalid config: {0}")]
    ValidationError(String),
}

/// Settings for [`init_module`](crate::init_module)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModuleConfig {
    /// Host module name
    pub name: String,

    /// Module doc string
    pub doc: String,

    /// Directory holding material tables and other data files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            name: "beamlink".to_string(),
            doc: "beamlink apparatus module".to_string(),
            data_dir: None,
        }
    }
}

impl ModuleConfig {
    /// Load and validate a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config document
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: ModuleConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::ValidationError(
                "Module name cannot be empty".to_string(),
            ));
        }

        if !is_valid_module_name(&self.name) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid module name: {}. Must start with a letter or underscore and contain only alphanumeric characters and underscores",
                self.name
            )));
        }

        Ok(())
    }

    /// Data directory, honouring `BEAMLINK_DATA_DIR`
    pub fn data_dir(&self) -> PathBuf {
        self.resolve_data_dir(std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
    }

    /// Data directory given an explicit override; falls back to the
    /// configured directory, then the working directory
    pub fn resolve_data_dir(&self, env_override: Option<PathBuf>) -> PathBuf {
        env_override
            .filter(|dir| !dir.as_os_str().is_empty())
            .or_else(|| self.data_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

fn is_valid_module_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
