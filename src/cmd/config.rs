// gitdeck: Local Git Command Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands for gitdeck.

use crate::cmd::print_json;
use crate::config::Config;
use crate::error::Result;

/// Display current configuration options.
///
/// # Errors
///
/// Returns an error if JSON output cannot be produced.
pub fn run_options_command(config: &Config, json: bool) -> Result<()> {
    if json {
        return print_json(config);
    }
    for line in config.format_options() {
        println!("{line}");
    }
    Ok(())
}

/// Display loaded configuration files.
pub fn run_configs_command(config_files: &[String]) {
    if config_files.is_empty() {
        println!("No configuration files loaded");
    } else {
        for line in config_files {
            println!("{line}");
        }
    }
}
