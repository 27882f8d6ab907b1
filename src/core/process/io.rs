// gitdeck: Local Git Command Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Output capture for processes.
//!
//! ```text
//! run_child()
//!   stdout/stderr reader tasks (read_to_end)
//!   wait + drain readers (one deadline for both)
//!     deadline --> kill, abort readers, CommandTimedOut
//!   decode bytes (lossy UTF-8, CRLF --> LF)
//!   --> CommandResult
//! ```

use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Child;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{trace, warn};

use super::builder::{CommandResult, ProcessBuilder};
use crate::error::ProcessError;
use crate::utility::encoding::decode_output;

type ReaderHandle = JoinHandle<std::io::Result<Vec<u8>>>;

/// Spawns a task draining `stream` into a byte buffer.
fn spawn_reader<R>(stream: Option<R>) -> Option<ReaderHandle>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    stream.map(|mut stream| {
        tokio::spawn(async move {
            let mut buffer = Vec::new();
            stream.read_to_end(&mut buffer).await?;
            Ok(buffer)
        })
    })
}

/// Waits for a reader task and decodes what it captured.
async fn collect_output(
    handle: Option<ReaderHandle>,
    command: &str,
    process_name: &str,
    stream_name: &str,
) -> Result<String, ProcessError> {
    let Some(handle) = handle else {
        return Ok(String::new());
    };

    let bytes = handle
        .await
        .map_err(|e| ProcessError::OutputError {
            command: command.to_string(),
            message: e.to_string(),
        })?
        .map_err(|e| ProcessError::OutputError {
            command: command.to_string(),
            message: e.to_string(),
        })?;

    let text = decode_output(&bytes);
    for line in text.lines() {
        trace!(process = %process_name, stream = %stream_name, line = %line, "output");
    }
    Ok(text)
}

/// Converts a duration to whole milliseconds, saturating.
pub(super) fn as_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl ProcessBuilder {
    /// Runs the child process, capturing output and waiting for completion.
    ///
    /// One deadline covers both the exit and the draining of the pipes, so a
    /// background grandchild holding stdout open cannot outlive the timeout.
    pub(super) async fn run_child(
        &self,
        name: &str,
        command: &str,
        child: &mut Child,
        started: Instant,
    ) -> Result<CommandResult, ProcessError> {
        let stdout_handle = spawn_reader(child.stdout.take());
        let stderr_handle = spawn_reader(child.stderr.take());
        let readers: Vec<AbortHandle> = [&stdout_handle, &stderr_handle]
            .into_iter()
            .flatten()
            .map(JoinHandle::abort_handle)
            .collect();

        let finish = async {
            let status = child
                .wait()
                .await
                .map_err(|e| ProcessError::OutputError {
                    command: command.to_string(),
                    message: format!("failed waiting for exit: {e}"),
                })?;
            let stdout = collect_output(stdout_handle, command, name, "stdout").await?;
            let stderr = collect_output(stderr_handle, command, name, "stderr").await?;
            Ok::<_, ProcessError>((status, stdout, stderr))
        };

        let finished = match self.timeout_duration() {
            Some(limit) => {
                let deadline = tokio::time::Instant::from_std(started) + limit;
                tokio::time::timeout_at(deadline, finish).await.ok()
            }
            None => Some(finish.await),
        };

        let Some(finished) = finished else {
            let limit = self.timeout_duration().unwrap_or_default();
            warn!(process = %name, timeout = ?limit, "process timed out, killing");
            // The child may already have exited while a grandchild holds the pipes.
            if !matches!(child.try_wait(), Ok(Some(_)))
                && let Err(e) = child.kill().await
            {
                warn!(process = %name, error = %e, "failed to kill timed out process");
            }
            for reader in readers {
                reader.abort();
            }
            return Err(ProcessError::CommandTimedOut {
                command: command.to_string(),
                timeout_ms: as_millis(limit),
            });
        };

        let (status, stdout, stderr) = finished?;
        Ok(CommandResult::new(
            status.code().unwrap_or(-1),
            stdout,
            stderr,
            as_millis(started.elapsed()),
        ))
    }
}
