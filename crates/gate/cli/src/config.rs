//! CLI configuration

use crate::error::{CliError, CliResult};
use legend_gate_types::GateConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CliConfig {
    /// File holding the persisted identity
    pub store_path: Option<PathBuf>,

    /// Gate behaviour
    pub gate: GateConfig,
}

impl CliConfig {
    /// Load configuration from file
    pub fn load(path: Option<&str>) -> CliResult<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: CliConfig =
                toml::from_str(&contents).map_err(|e| CliError::Config(e.to_string()))?;
            Ok(config)
        } else {
            Ok(CliConfig::default())
        }
    }

    /// Identity file, falling back to the platform data directory
    pub fn store_path(&self) -> CliResult<PathBuf> {
        match &self.store_path {
            Some(path) => Ok(path.clone()),
            None => {
                let data_dir = dirs::data_dir()
                    .ok_or_else(|| CliError::Config("Cannot find data directory".into()))?;
                Ok(data_dir.join("legend").join("identity.json"))
            }
        }
    }

    /// Get the default configuration file path
    fn default_config_path() -> CliResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CliError::Config("Cannot find config directory".into()))?;
        Ok(config_dir.join("legend").join("config.toml"))
    }
}
