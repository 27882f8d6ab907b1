// gitdeck: Local Git Command Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Operation commands: one gateway call, printed as text or JSON.

use crate::cli::ops::OpCommand;
use crate::cmd::{open_gateway, print_json};
use crate::config::Config;
use crate::error::Result;
use crate::gateway::{OperationOutcome, StructuredData};

/// Runs one operation against the active repository.
///
/// Returns the outcome's `success` flag so the caller can pick an exit code.
///
/// # Errors
///
/// Returns an error only if JSON output cannot be produced.
pub async fn run_op_command(op: OpCommand, config: &Config, json: bool) -> Result<bool> {
    let gateway = open_gateway(config);
    let (kind, args) = op.into_request();
    let outcome = gateway.invoke(kind, &args).await;

    if json {
        print_json(&outcome)?;
    } else if outcome.success {
        for line in render_outcome(&outcome) {
            println!("{line}");
        }
    } else {
        for line in render_outcome(&outcome) {
            eprintln!("{line}");
        }
    }

    Ok(outcome.success)
}

/// Renders an outcome for humans.
pub(crate) fn render_outcome(outcome: &OperationOutcome) -> Vec<String> {
    let mut lines = Vec::new();

    if outcome.success {
        if !outcome.message.is_empty() {
            lines.push(outcome.message.clone());
        }
    } else {
        match &outcome.error {
            Some(code) => lines.push(format!("Error [{code}]: {}", outcome.message)),
            None => lines.push(format!("Error: {}", outcome.message)),
        }
    }

    match &outcome.data {
        Some(StructuredData::Commits { commits }) => {
            lines.extend(commits.iter().map(|c| {
                format!(
                    "{} {} ({}, {})",
                    c.hash, c.subject, c.author, c.relative_date
                )
            }));
        }
        Some(StructuredData::Branches { branches, .. }) => {
            lines.extend(branches.iter().map(|b| {
                let marker = if b.is_current { '*' } else { ' ' };
                format!("{marker} {}", b.name)
            }));
        }
        Some(StructuredData::Remotes { remotes }) => {
            lines.extend(remotes.iter().map(|r| format!("{}\t{}", r.name, r.url)));
        }
        Some(StructuredData::Remote(_)) | None => {}
    }

    lines
}
