// gitdeck: Local Git Command Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and lifecycle management.
//!
//! ```text
//! run()
//!   |
//!   v
//! cwd is a directory? --no--> InvalidWorkingDirectory
//!   |
//!   v
//! build_command()
//! argv, cwd, env, piped stdio, stdin=null
//!   |
//!   v
//! spawn() --NotFound--> ExecutableNotFound
//!   |
//!   v
//! run_child()  (timeout --> kill --> CommandTimedOut)
//!   |
//!   v
//! CommandResult { exit_code, stdout, stderr, duration_ms }
//! ```

use std::fmt::Write as _;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::{debug, trace};

use super::builder::{CommandResult, ProcessBuilder};
use crate::error::ProcessError;

impl ProcessBuilder {
    /// Returns the display name for this process.
    pub(super) fn display_name(&self) -> String {
        self.name_override().map_or_else(
            || {
                self.program().file_stem().map_or_else(
                    || "process".to_string(),
                    |s| s.to_string_lossy().into_owned(),
                )
            },
            String::from,
        )
    }

    /// Returns the full command line as a string (for logging only).
    pub(super) fn command_line(&self) -> String {
        let mut cmd = format!("{}", self.program().display());
        for arg in self.args_slice() {
            if arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    /// Spawns and runs the process, waiting for completion.
    ///
    /// A non-zero exit code is not an error here; callers inspect
    /// [`CommandResult::exit_code`] themselves.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The working directory is not an existing directory.
    /// - The executable cannot be found or spawned.
    /// - The timeout elapses (the child is killed first).
    /// - Reading the output streams fails.
    pub async fn run(self) -> Result<CommandResult, ProcessError> {
        let name = self.display_name();
        let cmd_line = self.command_line();

        if let Some(cwd) = self.working_dir() {
            if !cwd.is_dir() {
                return Err(ProcessError::InvalidWorkingDirectory { path: cwd.clone() });
            }
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, "exec");

        let mut command = self.build_command();
        let started = Instant::now();

        let mut child = command.spawn().map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ProcessError::ExecutableNotFound {
                    name: self.program().display().to_string(),
                }
            } else {
                ProcessError::SpawnFailed {
                    command: cmd_line.clone(),
                    source,
                }
            }
        })?;

        let pid = child.id();
        trace!(process = %name, pid = ?pid, "spawned");

        let output = self.run_child(&name, &cmd_line, &mut child, started).await?;

        trace!(
            process = %name,
            exit_code = output.exit_code(),
            duration_ms = output.duration_ms(),
            "completed"
        );
        Ok(output)
    }

    /// Builds the tokio Command from this builder's configuration.
    fn build_command(&self) -> Command {
        let mut command = Command::new(self.program());

        command.args(self.args_slice());

        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }

        for (key, value) in self.environment() {
            command.env(key, value);
        }

        // Nothing is ever fed to the child, so a prompt fails fast instead of hanging
        command.stdin(Stdio::null());
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());

        command.kill_on_drop(true);

        command
    }
}
