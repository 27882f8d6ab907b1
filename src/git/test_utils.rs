// gitdeck: Local Git Command Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scripted [`CommandRunner`] double for unit tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::Notify;

use super::runner::CommandRunner;
use crate::core::process::builder::CommandResult;
use crate::error::ProcessError;

/// Canned reply for one subcommand.
#[derive(Debug, Clone)]
pub enum Reply {
    Output(CommandResult),
    Timeout,
}

/// Pauses a subcommand until the test releases it.
#[derive(Debug, Clone, Default)]
pub struct Gate {
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

/// One recorded `execute` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

/// Runner answering from a script keyed on the first argument.
///
/// Replies scripted for the same subcommand are served in order and the
/// last one repeats. Unscripted subcommands succeed with empty output.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    unavailable: bool,
    replies: Vec<(String, Reply)>,
    gate: Option<(String, Gate)>,
    calls: Mutex<Vec<Call>>,
    served: Mutex<HashMap<String, usize>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `is_available` report the tool as missing.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    pub fn on(mut self, subcommand: &str, exit_code: i32, stdout: &str, stderr: &str) -> Self {
        let result = CommandResult::new(exit_code, stdout.into(), stderr.into(), 1);
        self.replies
            .push((subcommand.to_string(), Reply::Output(result)));
        self
    }

    pub fn on_timeout(mut self, subcommand: &str) -> Self {
        self.replies.push((subcommand.to_string(), Reply::Timeout));
        self
    }

    /// Blocks `subcommand` on `gate` before replying.
    pub fn gated(mut self, subcommand: &str, gate: Gate) -> Self {
        self.gate = Some((subcommand.to_string(), gate));
        self
    }

    /// Answers `status --porcelain` as a valid working tree.
    pub fn valid_repo(self) -> Self {
        self.on("status", 0, "", "")
    }

    /// Answers `status --porcelain` as a plain directory.
    pub fn not_a_repo(self) -> Self {
        self.on(
            "status",
            128,
            "",
            "fatal: not a git repository (or any of the parent directories): .git",
        )
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    /// First argument of every recorded call, in order.
    pub fn subcommands(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| call.args.first().cloned())
            .collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn is_available(&self, _executable: &str) -> bool {
        !self.unavailable
    }

    async fn execute(
        &self,
        executable: &str,
        args: &[String],
        working_dir: &Path,
        timeout: Duration,
    ) -> Result<CommandResult, ProcessError> {
        self.calls.lock().expect("calls lock poisoned").push(Call {
            args: args.to_vec(),
            working_dir: working_dir.to_path_buf(),
        });

        let subcommand = args.first().map(String::as_str).unwrap_or_default();

        if let Some((gated, gate)) = &self.gate
            && gated == subcommand
        {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        let scripted: Vec<&Reply> = self
            .replies
            .iter()
            .filter(|(name, _)| name == subcommand)
            .map(|(_, reply)| reply)
            .collect();
        let reply = {
            let mut served = self.served.lock().expect("served lock poisoned");
            let count = served.entry(subcommand.to_string()).or_default();
            let reply = scripted
                .get(*count)
                .or_else(|| scripted.last())
                .map(|reply| (*reply).clone());
            *count += 1;
            reply
        };

        match reply {
            Some(Reply::Output(result)) => Ok(result),
            Some(Reply::Timeout) => Err(ProcessError::CommandTimedOut {
                command: format!("{executable} {}", args.join(" ")),
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            }),
            None => Ok(CommandResult::default()),
        }
    }
}
