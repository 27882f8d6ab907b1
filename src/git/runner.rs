// gitdeck: Local Git Command Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command runner abstraction.
//!
//! ```text
//! CommandRunner (trait) --> ShellRunner --> ProcessBuilder --> git
//!                       \-> test doubles (scripted, blocking)
//! ```

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use crate::core::process::builder::{CommandResult, ProcessBuilder};
use crate::error::ProcessError;

/// Executes one external command and captures its output.
///
/// Implementations must never route arguments through a shell.
pub trait CommandRunner: Send + Sync {
    /// Returns whether `executable` can be run.
    ///
    /// Implementations cache the answer; it is probed once per name.
    fn is_available(&self, executable: &str) -> bool;

    /// Runs `executable` with `args` inside `working_dir`.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if the working directory is invalid, the
    /// executable is missing, the timeout elapses, or output capture fails.
    /// A non-zero exit status is reported in the result, not as an error.
    fn execute(
        &self,
        executable: &str,
        args: &[String],
        working_dir: &Path,
        timeout: Duration,
    ) -> impl Future<Output = Result<CommandResult, ProcessError>> + Send;
}

/// Runs commands as real subprocesses.
///
/// Sets `GIT_TERMINAL_PROMPT=0` and `GCM_INTERACTIVE=never` so credential
/// prompts fail instead of blocking.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn is_available(&self, executable: &str) -> bool {
        ProcessBuilder::exists(executable)
    }

    async fn execute(
        &self,
        executable: &str,
        args: &[String],
        working_dir: &Path,
        timeout: Duration,
    ) -> Result<CommandResult, ProcessError> {
        let builder = ProcessBuilder::which(executable)?;
        builder
            .args(args)
            .cwd(working_dir)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .timeout(timeout)
            .name(executable)
            .run()
            .await
    }
}
