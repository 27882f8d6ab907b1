// gitdeck: Local Git Command Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//! anyhow::Result  binary, config loading, server startup
//!       ^
//!       | ?
//!   Process    InvalidWorkingDirectory, CommandTimedOut, ExecutableNotFound, ...
//!   Registry   UnknownRepository, PersistFailed
//!   Operation  OperationInProgress, NoRepositorySelected, RepositoryMissing,
//!              ToolUnavailable, EmptyCommitMessage, InvalidBranchName,
//!              BranchNotFound, AlreadyARepository, DuplicateRemoteName, ...
//!              wraps Process and Registry; code() --> camelCase wire code
//!   Config     InvalidValue
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

// --- Process Errors ---

/// Process execution errors.
///
/// These are environmental failures. Malformed tool output is never an error.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// The working directory does not exist or is not a directory.
    #[error("invalid working directory: {}", path.display())]
    InvalidWorkingDirectory { path: PathBuf },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process was killed after exceeding its time budget.
    #[error("process '{command}' timed out after {timeout_ms} ms")]
    CommandTimedOut { command: String, timeout_ms: u64 },

    /// Failed to collect process output or exit status.
    #[error("failed to read output from process '{command}': {message}")]
    OutputError { command: String, message: String },
}

// --- Registry Errors ---

/// Repository registry errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The path was never added to the registry.
    #[error("unknown repository: {}", path.display())]
    UnknownRepository { path: PathBuf },

    /// Writing the state file failed.
    #[error("failed to persist registry to '{}': {source}", path.display())]
    PersistFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The state could not be serialized.
    #[error("failed to serialize registry: {0}")]
    Serialize(#[from] serde_json::Error),
}

// --- Operation Errors ---

/// Errors surfaced by the operation gateway.
///
/// Every variant maps to a stable [`code`](OperationError::code) that front-ends
/// can match on.
#[derive(Debug, Error)]
pub enum OperationError {
    /// Another operation is still in flight.
    #[error("another operation is in progress")]
    OperationInProgress,

    /// No active repository has been selected.
    #[error("no repository selected")]
    NoRepositorySelected,

    /// The active repository is gone or is not a working tree.
    #[error("repository missing or not a working tree: {}", path.display())]
    RepositoryMissing { path: PathBuf },

    /// The version-control executable was not found at startup.
    #[error("'{tool}' is not available on this system")]
    ToolUnavailable { tool: String },

    /// Commit requested without a message.
    #[error("commit message must not be empty")]
    EmptyCommitMessage,

    /// Branch name rejected before reaching the tool.
    #[error("invalid branch name '{name}': {reason}")]
    InvalidBranchName { name: String, reason: &'static str },

    /// Checkout target is not in the branch list.
    #[error("branch not found: {branch}")]
    BranchNotFound { branch: String },

    /// `init` requested inside an existing working tree.
    #[error("already a repository: {}", path.display())]
    AlreadyARepository { path: PathBuf },

    /// Remote name already configured.
    #[error("remote already exists: {name}")]
    DuplicateRemoteName { name: String },

    /// A required argument is missing or blank.
    #[error("missing required argument '{argument}'")]
    MissingArgument { argument: &'static str },

    /// An argument was rejected before reaching the tool.
    #[error("invalid argument '{argument}': {reason}")]
    InvalidArgument {
        argument: &'static str,
        reason: &'static str,
    },

    /// The operation name is not recognized.
    #[error("unknown operation '{name}'")]
    UnknownOperation { name: String },

    /// The tool ran and reported a failure.
    #[error("{command} failed: {message}")]
    CommandFailed { command: String, message: String },

    /// Process execution error.
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// Registry error.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl OperationError {
    /// Stable, camelCase error code for wire formats.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::OperationInProgress => "operationInProgress",
            Self::NoRepositorySelected => "noRepositorySelected",
            Self::RepositoryMissing { .. } => "repositoryMissing",
            Self::ToolUnavailable { .. } => "toolUnavailable",
            Self::EmptyCommitMessage => "emptyCommitMessage",
            Self::InvalidBranchName { .. } => "invalidBranchName",
            Self::BranchNotFound { .. } => "branchNotFound",
            Self::AlreadyARepository { .. } => "alreadyARepository",
            Self::DuplicateRemoteName { .. } => "duplicateRemoteName",
            Self::MissingArgument { .. } => "missingArgument",
            Self::InvalidArgument { .. } => "invalidArgument",
            Self::UnknownOperation { .. } => "unknownOperation",
            Self::CommandFailed { .. } => "commandFailed",
            Self::Process(err) => match err {
                ProcessError::ExecutableNotFound { .. } => "executableNotFound",
                ProcessError::InvalidWorkingDirectory { .. } => "invalidWorkingDirectory",
                ProcessError::CommandTimedOut { .. } => "commandTimedOut",
                ProcessError::SpawnFailed { .. } | ProcessError::OutputError { .. } => {
                    "processFailed"
                }
            },
            Self::Registry(err) => match err {
                RegistryError::UnknownRepository { .. } => "unknownRepository",
                RegistryError::PersistFailed { .. } | RegistryError::Serialize(_) => {
                    "registryFailed"
                }
            },
        }
    }
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}
