// gitdeck: Local Git Command Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-operation handlers.
//!
//! Each handler validates its arguments before anything runs, builds an
//! argument vector, and classifies the tool's output.

use std::path::Path;

use tracing::debug;

use super::OperationGateway;
use super::types::{OperationOutcome, StructuredData};
use crate::core::process::builder::CommandResult;
use crate::error::OperationError;
use crate::git::parse::{LOG_FORMAT, RemoteInfo, parse_branches, parse_log, parse_remotes};
use crate::git::runner::CommandRunner;

/// Error markers git prints on failure, whatever the stream.
const FAILURE_MARKERS: [&str; 2] = ["fatal:", "error:"];

/// Reported by `commit` when there is nothing staged.
const NOTHING_TO_COMMIT: [&str; 3] = [
    "nothing to commit",
    "nothing added to commit",
    "no changes added to commit",
];

/// Reported by `log` on a branch without commits.
const NO_COMMITS_MARKERS: [&str; 2] = ["does not have any commits yet", "bad default revision"];

fn has_failure_marker(text: &str) -> bool {
    FAILURE_MARKERS.iter().any(|marker| text.contains(marker))
}

/// Stdout if it says anything, else stderr.
fn stdout_or_stderr(result: &CommandResult) -> String {
    let stdout = result.stdout().trim();
    if stdout.is_empty() {
        result.stderr().trim().to_string()
    } else {
        stdout.to_string()
    }
}

/// Stderr if it says anything, else stdout.
fn stderr_or_stdout(result: &CommandResult) -> String {
    let stderr = result.stderr().trim();
    if stderr.is_empty() {
        result.stdout().trim().to_string()
    } else {
        stderr.to_string()
    }
}

/// Trimmed, non-empty argument or `MissingArgument`.
fn required<'a>(
    value: Option<&'a str>,
    argument: &'static str,
) -> Result<&'a str, OperationError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(OperationError::MissingArgument { argument })
}

/// Rejects names git could read as options or paths.
fn check_branch_name(name: &str) -> Result<(), OperationError> {
    let reason = if name.trim().is_empty() {
        Some("name must not be empty")
    } else if name.contains(['/', '\\']) {
        Some("contains a path separator")
    } else if name.chars().any(char::is_control) {
        Some("contains control characters")
    } else if name.starts_with('-') {
        Some("must not start with '-'")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(OperationError::InvalidBranchName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

fn count_of(count: usize, one: &str, many: &str) -> String {
    format!("{count} {}", if count == 1 { one } else { many })
}

impl<R: CommandRunner> OperationGateway<R> {
    async fn run(&self, repo: &Path, args: &[&str]) -> Result<CommandResult, OperationError> {
        let args: Vec<String> = args.iter().map(|arg| (*arg).to_string()).collect();
        let result = self
            .runner
            .execute(self.options.tool(), &args, repo, self.options.timeout())
            .await?;
        debug!(
            args = ?args,
            exit_code = result.exit_code(),
            duration_ms = result.duration_ms(),
            "command completed"
        );
        Ok(result)
    }

    fn command_failed(&self, subcommand: &str, message: String) -> OperationError {
        OperationError::CommandFailed {
            command: format!("{} {subcommand}", self.options.tool()),
            message,
        }
    }

    /// Fails unless the command exited cleanly without error markers on
    /// stderr. Stdout may echo user text such as a commit subject.
    fn ensure_clean(&self, subcommand: &str, result: &CommandResult) -> Result<(), OperationError> {
        if result.success() && !has_failure_marker(result.stderr()) {
            Ok(())
        } else {
            Err(self.command_failed(subcommand, stderr_or_stdout(result)))
        }
    }

    pub(super) async fn status(&self, repo: &Path) -> Result<OperationOutcome, OperationError> {
        let result = self.run(repo, &["status"]).await?;
        if !result.success() {
            return Err(self.command_failed("status", stderr_or_stdout(&result)));
        }
        Ok(OperationOutcome::succeeded(result.stdout().trim_end()))
    }

    pub(super) async fn add(&self, repo: &Path) -> Result<OperationOutcome, OperationError> {
        let result = self.run(repo, &["add", "--all"]).await?;
        self.ensure_clean("add", &result)?;
        Ok(OperationOutcome::succeeded("Staged all changes"))
    }

    pub(super) async fn commit(
        &self,
        repo: &Path,
        message: Option<&str>,
    ) -> Result<OperationOutcome, OperationError> {
        let message = message
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .ok_or(OperationError::EmptyCommitMessage)?;

        let result = self.run(repo, &["commit", "-m", message]).await?;
        let combined = result.combined_output();

        if let Some(line) = combined
            .lines()
            .find(|line| NOTHING_TO_COMMIT.iter().any(|marker| line.contains(marker)))
        {
            return Ok(OperationOutcome::declined(line.trim()));
        }

        self.ensure_clean("commit", &result)?;
        Ok(OperationOutcome::succeeded(stdout_or_stderr(&result)))
    }

    /// `push` and `pull`: git writes progress to stderr even on success, so
    /// only the failure markers decide.
    pub(super) async fn sync(
        &self,
        repo: &Path,
        subcommand: &str,
    ) -> Result<OperationOutcome, OperationError> {
        let result = self.run(repo, &[subcommand]).await?;
        let text = stdout_or_stderr(&result);
        if has_failure_marker(&result.combined_output()) {
            return Err(self.command_failed(subcommand, text));
        }
        Ok(OperationOutcome::succeeded(text))
    }

    pub(super) async fn log(
        &self,
        repo: &Path,
        limit: Option<usize>,
    ) -> Result<OperationOutcome, OperationError> {
        let limit = limit.unwrap_or(self.options.log_limit()).to_string();
        let result = self.run(repo, &["log", LOG_FORMAT, "-n", &limit]).await?;

        let commits = if result.success() {
            parse_log(result.stdout())
        } else if NO_COMMITS_MARKERS
            .iter()
            .any(|marker| result.stderr().contains(marker))
        {
            Vec::new()
        } else {
            return Err(self.command_failed("log", stderr_or_stdout(&result)));
        };

        Ok(
            OperationOutcome::succeeded(count_of(commits.len(), "commit", "commits"))
                .with_data(StructuredData::Commits { commits }),
        )
    }

    pub(super) async fn branch_list(
        &self,
        repo: &Path,
        all: bool,
    ) -> Result<OperationOutcome, OperationError> {
        let args: &[&str] = if all {
            &["branch", "--no-color", "--all"]
        } else {
            &["branch", "--no-color"]
        };
        let result = self.run(repo, args).await?;
        if !result.success() {
            return Err(self.command_failed("branch", stderr_or_stdout(&result)));
        }

        let (branches, current) = parse_branches(result.stdout());
        Ok(
            OperationOutcome::succeeded(count_of(branches.len(), "branch", "branches"))
                .with_data(StructuredData::Branches { branches, current }),
        )
    }

    pub(super) async fn branch_create(
        &self,
        repo: &Path,
        name: Option<&str>,
    ) -> Result<OperationOutcome, OperationError> {
        let name = name.unwrap_or_default();
        check_branch_name(name)?;

        let result = self.run(repo, &["branch", name]).await?;
        self.ensure_clean("branch", &result)?;
        Ok(OperationOutcome::succeeded(format!("Created branch '{name}'")))
    }

    pub(super) async fn checkout(
        &self,
        repo: &Path,
        branch: Option<&str>,
    ) -> Result<OperationOutcome, OperationError> {
        // Matched verbatim, so surrounding whitespace is not forgiven.
        let branch = branch
            .filter(|b| !b.trim().is_empty())
            .ok_or(OperationError::MissingArgument { argument: "branch" })?;

        let listing = self.run(repo, &["branch", "--no-color"]).await?;
        if !listing.success() {
            return Err(self.command_failed("branch", stderr_or_stdout(&listing)));
        }
        let (branches, _) = parse_branches(listing.stdout());
        if !branches
            .iter()
            .any(|b| !b.is_placeholder() && b.name == branch)
        {
            return Err(OperationError::BranchNotFound {
                branch: branch.to_string(),
            });
        }

        // Trailing `--` keeps git from reading the name as a pathspec.
        let result = self.run(repo, &["checkout", branch, "--"]).await?;
        self.ensure_clean("checkout", &result)?;
        Ok(OperationOutcome::succeeded(stderr_or_stdout(&result)))
    }

    pub(super) async fn init(&self, repo: &Path) -> Result<OperationOutcome, OperationError> {
        if self.validator().validate(repo).await {
            return Err(OperationError::AlreadyARepository {
                path: repo.to_path_buf(),
            });
        }

        let result = self.run(repo, &["init"]).await?;
        self.ensure_clean("init", &result)?;

        let valid = self.validator().validate(repo).await;
        self.registry.record_validation(repo, valid)?;
        Ok(OperationOutcome::succeeded(stdout_or_stderr(&result)))
    }

    pub(super) async fn remote_add(
        &self,
        repo: &Path,
        name: Option<&str>,
        url: Option<&str>,
    ) -> Result<OperationOutcome, OperationError> {
        let name = required(name, "name")?;
        let url = required(url, "url")?;
        if name.starts_with('-') {
            return Err(OperationError::InvalidArgument {
                argument: "name",
                reason: "must not start with '-'",
            });
        }
        if url.starts_with('-') {
            return Err(OperationError::InvalidArgument {
                argument: "url",
                reason: "must not start with '-'",
            });
        }

        let listing = self.run(repo, &["remote", "-v"]).await?;
        if parse_remotes(listing.stdout()).iter().any(|r| r.name == name) {
            return Err(OperationError::DuplicateRemoteName {
                name: name.to_string(),
            });
        }

        let result = self.run(repo, &["remote", "add", name, url]).await?;
        self.ensure_clean("remote add", &result)?;
        Ok(
            OperationOutcome::succeeded(format!("Added remote '{name}'")).with_data(
                StructuredData::Remote(RemoteInfo {
                    name: name.to_string(),
                    url: url.to_string(),
                }),
            ),
        )
    }

    pub(super) async fn remote_list(&self, repo: &Path) -> Result<OperationOutcome, OperationError> {
        let result = self.run(repo, &["remote", "-v"]).await?;
        if !result.success() {
            return Err(self.command_failed("remote", stderr_or_stdout(&result)));
        }

        let remotes = parse_remotes(result.stdout());
        Ok(
            OperationOutcome::succeeded(count_of(remotes.len(), "remote", "remotes"))
                .with_data(StructuredData::Remotes { remotes }),
        )
    }
}
