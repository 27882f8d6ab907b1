// gitdeck: Local Git Command Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Working tree validation.
//!
//! ```text
//! validate(path) --> git status --porcelain (cwd = path)
//!   exit 0 && stderr without "not a (git) repository" --> true
//!   anything else (incl. runner errors)                --> false
//! ```

use std::path::Path;
use std::time::Duration;

use tracing::debug;

use super::runner::CommandRunner;

/// Checks whether a directory is a working tree of the configured tool.
///
/// Never touches the registry; callers record the verdict themselves.
pub struct RepositoryValidator<'a, R> {
    runner: &'a R,
    executable: &'a str,
    timeout: Duration,
}

impl<'a, R: CommandRunner> RepositoryValidator<'a, R> {
    pub const fn new(runner: &'a R, executable: &'a str, timeout: Duration) -> Self {
        Self {
            runner,
            executable,
            timeout,
        }
    }

    /// Probes `path` with a cheap status call.
    pub async fn validate(&self, path: &Path) -> bool {
        let args = ["status".to_string(), "--porcelain".to_string()];
        match self
            .runner
            .execute(self.executable, &args, path, self.timeout)
            .await
        {
            Ok(result) => {
                let stderr = result.stderr().to_lowercase();
                let valid = result.success()
                    && !stderr.contains("not a git repository")
                    && !stderr.contains("not a repository");
                debug!(path = %path.display(), valid, "validated repository");
                valid
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "validation probe failed");
                false
            }
        }
    }
}
