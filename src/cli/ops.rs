// gitdeck: Local Git Command Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Operation commands, one per gateway operation.
//!
//! ```text
//! status                      add
//! commit -m MSG               push | pull
//! log [-n N]                  init
//! branches [--all]            branch NAME
//! checkout BRANCH
//! remote list                 remote add NAME URL
//! ```

use clap::{Args, Subcommand};

use crate::gateway::{OperationArgs, OperationKind};

/// Commands that run against the active repository.
#[derive(Debug, Clone, Subcommand)]
pub enum OpCommand {
    /// Shows the working tree status.
    Status,

    /// Stages every change in the working tree.
    Add,

    /// Records staged changes.
    Commit(CommitArgs),

    /// Pushes the current branch.
    Push,

    /// Pulls from the configured upstream.
    Pull,

    /// Shows recent commits.
    Log(LogArgs),

    /// Lists branches.
    Branches(BranchesArgs),

    /// Creates a branch at HEAD without switching to it.
    Branch(BranchArgs),

    /// Switches to an existing local branch.
    Checkout(CheckoutArgs),

    /// Initializes a repository in the active directory.
    Init,

    /// Lists or adds remotes.
    Remote(RemoteArgs),
}

#[derive(Debug, Clone, Args)]
pub struct CommitArgs {
    /// Commit message.
    #[arg(short = 'm', long = "message", value_name = "MSG")]
    pub message: String,
}

#[derive(Debug, Clone, Args)]
pub struct LogArgs {
    /// Maximum number of commits (defaults to `git.log_limit`).
    #[arg(short = 'n', long = "limit", value_name = "N")]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Args)]
pub struct BranchesArgs {
    /// Include remote-tracking branches.
    #[arg(short = 'a', long)]
    pub all: bool,
}

#[derive(Debug, Clone, Args)]
pub struct BranchArgs {
    #[arg(value_name = "NAME")]
    pub name: String,
}

#[derive(Debug, Clone, Args)]
pub struct CheckoutArgs {
    #[arg(value_name = "BRANCH")]
    pub branch: String,
}

#[derive(Debug, Clone, Args)]
pub struct RemoteArgs {
    #[command(subcommand)]
    pub subcommand: RemoteSubcommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum RemoteSubcommand {
    /// Lists configured remotes.
    List,
    /// Adds a remote.
    Add {
        #[arg(value_name = "NAME")]
        name: String,
        #[arg(value_name = "URL")]
        url: String,
    },
}

impl OpCommand {
    /// Translates the command into a gateway request.
    #[must_use]
    pub fn into_request(self) -> (OperationKind, OperationArgs) {
        let args = OperationArgs::default();
        match self {
            Self::Status => (OperationKind::Status, args),
            Self::Add => (OperationKind::Add, args),
            Self::Commit(CommitArgs { message }) => (
                OperationKind::Commit,
                OperationArgs {
                    message: Some(message),
                    ..args
                },
            ),
            Self::Push => (OperationKind::Push, args),
            Self::Pull => (OperationKind::Pull, args),
            Self::Log(LogArgs { limit }) => (OperationKind::Log, OperationArgs { limit, ..args }),
            Self::Branches(BranchesArgs { all }) => {
                (OperationKind::BranchList, OperationArgs { all, ..args })
            }
            Self::Branch(BranchArgs { name }) => (
                OperationKind::BranchCreate,
                OperationArgs {
                    name: Some(name),
                    ..args
                },
            ),
            Self::Checkout(CheckoutArgs { branch }) => (
                OperationKind::Checkout,
                OperationArgs {
                    branch: Some(branch),
                    ..args
                },
            ),
            Self::Init => (OperationKind::Init, args),
            Self::Remote(RemoteArgs { subcommand }) => match subcommand {
                RemoteSubcommand::List => (OperationKind::RemoteList, args),
                RemoteSubcommand::Add { name, url } => (
                    OperationKind::RemoteAdd,
                    OperationArgs {
                        name: Some(name),
                        url: Some(url),
                        ..args
                    },
                ),
            },
        }
    }
}
