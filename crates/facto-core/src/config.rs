//! Configuration for the generator.

use crate::validator::DEFAULT_MAX_CHAIN_DEPTH;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration, loadable from a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Emitter configuration.
    #[serde(default)]
    pub emitter: EmitterConfig,

    /// Validator configuration.
    #[serde(default)]
    pub validator: ValidatorConfig,
}

impl GeneratorConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }
}

/// Emitter-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmitterConfig {
    /// Suffix appended to the group's simple name (default: `Factory`).
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Header comment written atop every generated file; empty string
    /// disables it.
    #[serde(default = "default_header")]
    pub header: String,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
            header: default_header(),
        }
    }
}

impl EmitterConfig {
    /// The header as an option, `None` when disabled.
    #[must_use]
    pub fn header_opt(&self) -> Option<&str> {
        if self.header.is_empty() {
            None
        } else {
            Some(&self.header)
        }
    }
}

/// Validator-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Upper bound on superclass-chain walks (default: 64).
    #[serde(default = "default_max_chain_depth")]
    pub max_chain_depth: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_chain_depth: default_max_chain_depth(),
        }
    }
}

fn default_suffix() -> String {
    crate::emitter::DEFAULT_FACTORY_SUFFIX.to_owned()
}

fn default_header() -> String {
    "Generated by facto. Do not edit.".to_owned()
}

fn default_max_chain_depth() -> usize {
    DEFAULT_MAX_CHAIN_DEPTH
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading the config file.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in the config file.
    #[error("failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
