// gitdeck: Local Git Command Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository registry commands.
//!
//! ```text
//! repo list                  registered paths, active marked with '*'
//! repo add PATH              register without activating
//! repo add --activate PATH   register, validate, activate
//! repo use PATH              validate and activate a registered path
//! repo remove PATH           forget (clears active if it matches)
//! ```

use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Arguments for the `repo` command.
#[derive(Debug, Clone, Args)]
pub struct RepoArgs {
    #[command(subcommand)]
    pub subcommand: RepoSubcommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum RepoSubcommand {
    /// Lists registered repositories.
    List,

    /// Registers a directory.
    Add {
        #[arg(value_name = "PATH")]
        path: PathBuf,
        /// Also validate it and make it the active repository.
        #[arg(short = 'a', long)]
        activate: bool,
    },

    /// Validates a registered directory and makes it active.
    Use {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Removes a directory from the registry.
    Remove {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}

/// Arguments for the `serve` command.
#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Address to listen on (overrides `server.bind`).
    #[arg(short = 'b', long = "bind", value_name = "ADDR")]
    pub bind: Option<String>,
}
