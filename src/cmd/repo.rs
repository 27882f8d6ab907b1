// gitdeck: Local Git Command Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository registry commands.

use crate::cli::repo::{RepoArgs, RepoSubcommand};
use crate::cmd::{open_gateway, print_json};
use crate::config::Config;
use crate::error::{RegistryError, Result};
use crate::registry::{RegistryState, Repository, normalize};

/// Main handler for the `repo` command.
///
/// # Errors
///
/// Returns an error if the path is unknown or not a directory, another
/// operation holds the gateway, or the state file cannot be written.
pub async fn run_repo_command(args: RepoArgs, config: &Config, json: bool) -> Result<()> {
    let gateway = open_gateway(config);
    let registry = gateway.registry();

    let state = match args.subcommand {
        RepoSubcommand::List => registry.state(),
        RepoSubcommand::Add { path, activate } => {
            if activate {
                gateway.select_repository(&path).await?
            } else {
                registry.add_repository(&path)?
            }
        }
        RepoSubcommand::Use { path } => {
            let path = normalize(&path);
            if registry.state().get(&path).is_none() {
                return Err(RegistryError::UnknownRepository { path }.into());
            }
            gateway.select_repository(&path).await?
        }
        RepoSubcommand::Remove { path } => registry.remove_repository(&path)?,
    };

    if json {
        print_json(&state)?;
    } else {
        for line in render_state(&state) {
            println!("{line}");
        }
    }
    Ok(())
}

/// One line per repository, active entry marked with `*`.
pub(crate) fn render_state(state: &RegistryState) -> Vec<String> {
    if state.repositories.is_empty() {
        return vec!["No repositories registered".to_string()];
    }

    state
        .repositories
        .iter()
        .map(|repo| {
            let active = state.active_repository.as_deref() == Some(repo.path.as_path());
            let marker = if active { '*' } else { ' ' };
            format!("{marker} {} [{}]", repo.path.display(), verdict(repo))
        })
        .collect()
}

const fn verdict(repo: &Repository) -> &'static str {
    match (repo.is_checked(), repo.is_valid) {
        (false, _) => "unchecked",
        (true, true) => "valid",
        (true, false) => "invalid",
    }
}
