// gitdeck: Local Git Command Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for gitdeck.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. gitdeck.toml (cwd, optional)
//! 3. --config (repeatable, in order)
//! 4. GITDECK_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! GITDECK_GIT__TIMEOUT_MS=5000        → git.timeout_ms = 5000
//! GITDECK_REGISTRY__STATE_FILE=s.json → registry.state_file = "s.json"
//! GITDECK_SERVER__BIND=0.0.0.0:8080   → server.bind = "0.0.0.0:8080"
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::Path;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{GitConfig, GlobalConfig, RegistryConfig, ServerConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Version-control tool.
    pub git: GitConfig,
    /// Repository registry.
    pub registry: RegistryConfig,
    /// HTTP server.
    pub server: ServerConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gitdeck::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("gitdeck.toml")
    ///     .with_env_prefix("GITDECK")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Rejects values that would make the service unusable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending key.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let invalid = |section: &str, key: &str, message: &str| ConfigError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            message: message.to_string(),
        };

        if self.git.executable.trim().is_empty() {
            return Err(invalid("git", "executable", "must not be empty"));
        }
        if self.git.timeout_ms == 0 {
            return Err(invalid("git", "timeout_ms", "must be greater than zero"));
        }
        if self.git.log_limit == 0 {
            return Err(invalid("git", "log_limit", "must be greater than zero"));
        }
        if self.registry.state_file.as_os_str().is_empty() {
            return Err(invalid("registry", "state_file", "must not be empty"));
        }
        if self.server.bind.parse::<SocketAddr>().is_err() {
            return Err(invalid("server", "bind", "expected an address like 127.0.0.1:5000"));
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();

        options.insert(
            "global.output_log_level",
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level",
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file",
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert("global.log_json", self.global.log_json.to_string());
        options.insert("git.executable", self.git.executable.clone());
        options.insert("git.timeout_ms", self.git.timeout_ms.to_string());
        options.insert("git.log_limit", self.git.log_limit.to_string());
        options.insert(
            "registry.state_file",
            self.registry.state_file.display().to_string(),
        );
        options.insert("server.bind", self.server.bind.clone());

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
