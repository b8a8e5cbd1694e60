//! TOML configuration.
//!
//! Looked up in order: an explicit path, `$KEYCALC_CONFIG`, then
//! `<config dir>/keycalc/config.toml`. A missing file means defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::calculator::{
    DEFAULT_ERROR_MARKER, DEFAULT_PLACEHOLDER, DEFAULT_PRECISION, EngineOptions, MAX_PRECISION,
};

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "KEYCALC_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("precision {0} is out of range (0..={max})", max = MAX_PRECISION)]
    Precision(u32),
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Decimal places kept after evaluation.
    pub precision: u32,
    /// Shown when the buffer is empty.
    pub placeholder: String,
    /// Shown after a failed evaluation.
    pub error_marker: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            error_marker: DEFAULT_ERROR_MARKER.to_string(),
        }
    }
}

impl Config {
    /// Parse a TOML document.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file that must exist.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// The per-user config path, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("keycalc").join("config.toml"))
    }

    /// Load from `explicit`, the environment, or the per-user path.
    ///
    /// An explicit or environment-named file must exist; the per-user file
    /// is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            info!("Loading config from: {}", path.display());
            return Self::from_file(path);
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            let path = PathBuf::from(path);
            info!("Loading config from ${}: {}", CONFIG_ENV, path.display());
            return Self::from_file(&path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => {
                info!("Loading config from: {}", path.display());
                Self::from_file(&path)
            }
            _ => {
                debug!("Using default configuration");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.precision > MAX_PRECISION {
            return Err(ConfigError::Precision(self.precision));
        }
        Ok(())
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            precision: self.precision,
            placeholder: self.placeholder.clone(),
            error_marker: self.error_marker.clone(),
        }
    }
}
