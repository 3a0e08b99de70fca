// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! actform configuration.
//!
//! Configuration is loaded from `actform.toml` in the working directory.
//! Every key is optional.
//!
//! # Example Configuration
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [actions]
//! redirect_signal = "NEXT_REDIRECT"
//! not_found_signal = "NEXT_NOT_FOUND"
//!
//! [actions.decoder]
//! separator = "."
//! collisions = "keep-flat"
//! empty_file_is_absent = true
//! ```

use std::fs;
use std::path::Path;

use actform::ActionConfig;
use serde::Deserialize;

/// Name of the configuration file.
pub const CONFIG_FILE: &str = "actform.toml";

/// Main configuration structure loaded from `actform.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Settings shared by every form action.
    #[serde(default)]
    pub actions: ActionConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server port (default: 3000).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Server host (default: "127.0.0.1").
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

impl Config {
    /// Loads configuration from `actform.toml` in the current directory.
    ///
    /// If no configuration file exists, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be parsed
    /// or holds unusable action settings.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Loads configuration from the given path, falling back to defaults
    /// when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if
    /// [`ActionConfig::validate`] rejects the action settings.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.actions.validate()?;
        Ok(config)
    }
}
