//! `snipdb.toml` configuration.
//!
//! Every section is optional; missing keys take the defaults below.
//! Unknown keys are rejected so typos surface at load time.

use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error as ThisError;

/// Conventional file name looked up by callers.
pub const CONFIG_FILE: &str = "snipdb.toml";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

///
/// Config
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub codec: CodecConfig,
    pub store: StoreConfig,
}

impl Config {
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(src)?;
        config.check()?;

        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let src = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&src)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.store.first_id == 0 {
            return Err(ConfigError::Invalid {
                key: "store.first_id",
                message: "ids start at 1 or above".to_string(),
            });
        }

        Ok(())
    }
}

///
/// CodecConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Log per-field resolution detail.
    pub debug: bool,

    /// Reject input keys that match no declared field.
    pub reject_unknown_fields: bool,
}

///
/// StoreConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub first_id: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { first_id: 1 }
    }
}

///
/// TESTS
///
