// gitdeck: Local Git Command Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for gitdeck using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! gitdeck [global options] <command>
//! version | options | configs
//! repo {list|add|use|remove}
//! status | add | commit | push | pull | log | init
//! branches | branch | checkout | remote {list|add}
//! serve [--bind ADDR]
//! ```

pub mod global;
pub mod ops;
pub mod repo;


use crate::cli::global::GlobalOptions;
use crate::cli::ops::OpCommand;
use crate::cli::repo::{RepoArgs, ServeArgs};
use clap::{Parser, Subcommand};

/// Local git command service.
#[derive(Debug, Parser)]
#[command(
    name = "gitdeck",
    author,
    version,
    about = "Button-friendly git command service",
    long_about = "gitdeck Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Runs a fixed set of git operations against the active\n\
                  repository. Pick one with `gitdeck repo use <path>`, then\n\
                  run `gitdeck status`, `gitdeck commit -m ...` and so on, or\n\
                  start the HTTP/JSON API with `gitdeck serve`.",
    after_help = "CONFIG FILES:\n\n\
                  gitdeck reads `gitdeck.toml` from the current directory unless\n\
                  --no-default-config is given, then every --config file in order.\n\
                  GITDECK_<SECTION>__<KEY> environment variables override files,\n\
                  and command-line flags override everything."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists all options and their effective values.
    Options,

    /// Lists the configuration files that were loaded.
    Configs,

    /// Manages the repository registry.
    Repo(RepoArgs),

    /// Serves the HTTP/JSON API.
    Serve(ServeArgs),

    #[command(flatten)]
    Op(OpCommand),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
