// gitdeck: Local Git Command Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE       ← Additional config files (can repeat)
//! --state-file FILE   ← registry.state_file
//! --git EXE           ← git.executable
//! --timeout-ms N      ← git.timeout_ms
//! --log-level N       ← Console verbosity (0-5)
//! --file-log-level N  ← File verbosity (defaults to --log-level)
//! --log-file FILE     ← global.log_file
//! --log-json          ← global.log_json
//! --json              ← Machine-readable output
//!
//! Precedence: CLI flags > GITDECK_* env > --config > gitdeck.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::config::loader::ConfigLoader;
use crate::error::Result;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times; later files win.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        action = clap::ArgAction::Append
    )]
    pub configs: Vec<PathBuf>,

    /// Disables loading `gitdeck.toml` from the current directory.
    #[arg(long = "no-default-config", global = true)]
    pub no_default_config: bool,

    /// Registry state file.
    #[arg(long = "state-file", value_name = "FILE", global = true)]
    pub state_file: Option<PathBuf>,

    /// Version-control executable name or path.
    #[arg(long = "git", value_name = "EXE", global = true)]
    pub git: Option<String>,

    /// Per-command timeout in milliseconds.
    #[arg(
        long = "timeout-ms",
        value_name = "MS",
        global = true,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_ms: Option<u64>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(
        short = 'l',
        long = "log-level",
        value_name = "LEVEL",
        global = true,
        value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(
        long = "file-log-level",
        value_name = "LEVEL",
        global = true,
        value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Write the log file as JSON lines.
    #[arg(long = "log-json", global = true)]
    pub log_json: bool,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    /// Builds a loader over every configuration source, CLI flags last.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be applied.
    pub fn config_loader(&self) -> Result<ConfigLoader> {
        let mut loader = ConfigLoader::new();
        if !self.no_default_config {
            loader = loader.add_toml_file_optional("gitdeck.toml");
        }
        for path in &self.configs {
            loader = loader.add_toml_file(path);
        }

        // file_log_level falls back to log_level if not specified
        let file_log_level = self.file_log_level.or(self.log_level);

        loader
            .with_env_prefix("GITDECK")
            .set_opt(
                "global.output_log_level",
                self.log_level.map(i64::from),
            )?
            .set_opt("global.file_log_level", file_log_level.map(i64::from))?
            .set_opt("global.log_file", self.log_file.as_deref().map(path_value))?
            .set_opt("global.log_json", self.log_json.then_some(true))?
            .set_opt(
                "registry.state_file",
                self.state_file.as_deref().map(path_value),
            )?
            .set_opt("git.executable", self.git.clone())?
            .set_opt("git.timeout_ms", self.timeout_ms)
    }
}

fn path_value(path: &std::path::Path) -> String {
    path.to_string_lossy().into_owned()
}
