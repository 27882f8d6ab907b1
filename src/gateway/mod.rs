// gitdeck: Local Git Command Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Operation gateway: the single entry point for front-ends.
//!
//! ```text
//! invoke(kind, args)
//!   |
//!   BusyGuard::acquire   idle --CAS--> busy   (else OperationInProgress)
//!   |
//!   prepare(kind)
//!     a. active repository set          else NoRepositorySelected
//!     b. path is a directory            else RepositoryMissing
//!     c. tool found at startup          else ToolUnavailable
//!     d. kind != init: validate + record the fresh verdict
//!          invalid --> RepositoryMissing (nothing executed)
//!   |
//!   dispatch --> ops::{status, add, commit, ...} --> CommandRunner
//!   |
//!   OperationOutcome            busy --drop--> idle
//! ```
//!
//! `invoke` never fails; `try_invoke` keeps the typed error for in-process
//! callers.

mod ops;
pub mod types;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use bon::Builder;
use tracing::{info, warn};

use crate::error::OperationError;
use crate::git::runner::CommandRunner;
use crate::git::validator::RepositoryValidator;
use crate::registry::{RegistryState, RepositoryRegistry, normalize};

pub use types::{OperationArgs, OperationKind, OperationOutcome, StructuredData};

/// Default number of commits returned by `log`.
pub const DEFAULT_LOG_LIMIT: usize = 20;

/// Tunables for the gateway.
#[derive(Debug, Clone, Builder)]
pub struct GatewayOptions {
    /// Version-control executable name or path.
    #[builder(into, setters(name = with_tool), default = String::from("git"))]
    tool: String,
    /// Per-command time budget.
    #[builder(setters(name = with_timeout), default = Duration::from_secs(120))]
    timeout: Duration,
    #[builder(setters(name = with_log_limit), default = DEFAULT_LOG_LIMIT)]
    log_limit: usize,
}

impl Default for GatewayOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl GatewayOptions {
    #[must_use]
    pub fn tool(&self) -> &str {
        &self.tool
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub const fn log_limit(&self) -> usize {
        self.log_limit
    }
}

/// Holds the in-flight flag for the lifetime of one call.
///
/// Released on drop, including during unwinding.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, OperationError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| Self { flag })
            .map_err(|_| OperationError::OperationInProgress)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Runs named operations against the active repository, one at a time.
pub struct OperationGateway<R> {
    runner: R,
    registry: RepositoryRegistry,
    options: GatewayOptions,
    tool_available: bool,
    busy: AtomicBool,
}

impl<R: CommandRunner> OperationGateway<R> {
    /// Creates a gateway, probing the tool once.
    pub fn new(runner: R, registry: RepositoryRegistry, options: GatewayOptions) -> Self {
        let tool_available = runner.is_available(options.tool());
        if tool_available {
            info!(tool = %options.tool(), "version-control tool found");
        } else {
            warn!(tool = %options.tool(), "version-control tool not found, operations will fail");
        }
        Self {
            runner,
            registry,
            options,
            tool_available,
            busy: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub const fn registry(&self) -> &RepositoryRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn options(&self) -> &GatewayOptions {
        &self.options
    }

    #[must_use]
    pub const fn tool_available(&self) -> bool {
        self.tool_available
    }

    /// Whether an operation is currently in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Runs `kind`, folding every error into a failed outcome.
    pub async fn invoke(&self, kind: OperationKind, args: &OperationArgs) -> OperationOutcome {
        match self.try_invoke(kind, args).await {
            Ok(outcome) => outcome,
            Err(err) => OperationOutcome::from(&err),
        }
    }

    /// Runs `kind` against the active repository.
    ///
    /// # Errors
    ///
    /// Returns an `OperationError` for precondition failures, rejected
    /// arguments, tool failures, and environmental problems. An outcome with
    /// `success == false` is returned as `Ok` when the tool declined the
    /// request without failing (nothing to commit).
    pub async fn try_invoke(
        &self,
        kind: OperationKind,
        args: &OperationArgs,
    ) -> Result<OperationOutcome, OperationError> {
        let _guard = BusyGuard::acquire(&self.busy)?;
        let started = Instant::now();

        let result = match self.prepare(kind).await {
            Ok(repo) => self.dispatch(kind, args, &repo).await,
            Err(err) => Err(err),
        };

        let elapsed = started.elapsed();
        match &result {
            Ok(outcome) => info!(
                operation = %kind,
                success = outcome.success,
                duration_ms = elapsed.as_millis(),
                "operation finished"
            ),
            Err(err) => warn!(
                operation = %kind,
                code = err.code(),
                error = %err,
                duration_ms = elapsed.as_millis(),
                "operation failed"
            ),
        }
        result
    }

    /// Registers `path`, validates it when possible, and makes it active.
    ///
    /// Plain directories are accepted so that `init` can target them.
    ///
    /// # Errors
    ///
    /// Returns `OperationInProgress` while another call runs,
    /// `RepositoryMissing` if `path` is not a directory, or a registry error.
    pub async fn select_repository(&self, path: &Path) -> Result<RegistryState, OperationError> {
        let _guard = BusyGuard::acquire(&self.busy)?;

        let path = normalize(path);
        if !path.is_dir() {
            return Err(OperationError::RepositoryMissing { path });
        }

        self.registry.add_repository(&path)?;
        if self.tool_available {
            let valid = self.validator().validate(&path).await;
            self.registry.record_validation(&path, valid)?;
        }
        let state = self.registry.set_active(&path)?;

        info!(path = %path.display(), "repository selected");
        Ok(state)
    }

    fn validator(&self) -> RepositoryValidator<'_, R> {
        RepositoryValidator::new(&self.runner, self.options.tool(), self.options.timeout())
    }

    /// Checks preconditions in order and returns the repository path.
    async fn prepare(&self, kind: OperationKind) -> Result<PathBuf, OperationError> {
        let state = self.registry.state();
        let repo = state
            .active()
            .cloned()
            .ok_or(OperationError::NoRepositorySelected)?;

        if !repo.path.is_dir() {
            return Err(OperationError::RepositoryMissing { path: repo.path });
        }

        if !self.tool_available {
            return Err(OperationError::ToolUnavailable {
                tool: self.options.tool().to_string(),
            });
        }

        // Verdicts go stale when the directory changes outside gitdeck.
        if kind.requires_repository() {
            let valid = self.validator().validate(&repo.path).await;
            if repo.is_checked() && valid != repo.is_valid {
                info!(path = %repo.path.display(), valid, "repository verdict changed");
            }
            self.registry.record_validation(&repo.path, valid)?;
            if !valid {
                return Err(OperationError::RepositoryMissing { path: repo.path });
            }
        }

        Ok(repo.path)
    }

    async fn dispatch(
        &self,
        kind: OperationKind,
        args: &OperationArgs,
        repo: &Path,
    ) -> Result<OperationOutcome, OperationError> {
        match kind {
            OperationKind::Status => self.status(repo).await,
            OperationKind::Add => self.add(repo).await,
            OperationKind::Commit => self.commit(repo, args.message.as_deref()).await,
            OperationKind::Push => self.sync(repo, "push").await,
            OperationKind::Pull => self.sync(repo, "pull").await,
            OperationKind::Log => self.log(repo, args.limit).await,
            OperationKind::BranchList => self.branch_list(repo, args.all).await,
            OperationKind::BranchCreate => self.branch_create(repo, args.name.as_deref()).await,
            OperationKind::Checkout => self.checkout(repo, args.branch.as_deref()).await,
            OperationKind::Init => self.init(repo).await,
            OperationKind::RemoteAdd => {
                self.remote_add(repo, args.name.as_deref(), args.url.as_deref())
                    .await
            }
            OperationKind::RemoteList => self.remote_list(repo).await,
        }
    }
}
