// gitdeck: Local Git Command Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   config (options, configs), op, repo, serve
//!
//! Config --> open_gateway --> OperationGateway<ShellRunner>
//! ```

pub mod config;
pub mod op;
pub mod repo;
pub mod serve;


use serde::Serialize;

use crate::config::Config;
use crate::error::Result;
use crate::gateway::{GatewayOptions, OperationGateway};
use crate::git::runner::ShellRunner;
use crate::registry::RepositoryRegistry;

/// Builds a gateway over real subprocesses from the effective configuration.
#[must_use]
pub fn open_gateway(config: &Config) -> OperationGateway<ShellRunner> {
    let registry = RepositoryRegistry::open(&config.registry.state_file);
    let options = GatewayOptions::builder()
        .with_tool(config.git.executable.as_str())
        .with_timeout(config.git.timeout())
        .with_log_limit(config.git.log_limit)
        .build();
    OperationGateway::new(ShellRunner, registry, options)
}

/// Prints `value` as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if `value` cannot be serialized.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
