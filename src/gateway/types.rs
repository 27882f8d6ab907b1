// gitdeck: Local Git Command Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Wire types for the operation gateway.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OperationError;
use crate::git::parse::{BranchInfo, CommitRecord, RemoteInfo};

/// Operations the gateway can run against the active repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationKind {
    Status,
    Add,
    Commit,
    Push,
    Pull,
    Log,
    BranchList,
    BranchCreate,
    Checkout,
    Init,
    RemoteAdd,
    RemoteList,
}

impl OperationKind {
    pub const ALL: [Self; 12] = [
        Self::Status,
        Self::Add,
        Self::Commit,
        Self::Push,
        Self::Pull,
        Self::Log,
        Self::BranchList,
        Self::BranchCreate,
        Self::Checkout,
        Self::Init,
        Self::RemoteAdd,
        Self::RemoteList,
    ];

    /// Wire name, identical to the serde representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Add => "add",
            Self::Commit => "commit",
            Self::Push => "push",
            Self::Pull => "pull",
            Self::Log => "log",
            Self::BranchList => "branchList",
            Self::BranchCreate => "branchCreate",
            Self::Checkout => "checkout",
            Self::Init => "init",
            Self::RemoteAdd => "remoteAdd",
            Self::RemoteList => "remoteList",
        }
    }

    /// Whether the operation needs a validated working tree.
    #[must_use]
    pub const fn requires_repository(self) -> bool {
        !matches!(self, Self::Init)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| OperationError::UnknownOperation {
                name: s.to_string(),
            })
    }
}

/// Operation-specific parameters. Unused fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OperationArgs {
    /// Commit message (`commit`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Maximum number of commits (`log`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    /// Include remote-tracking branches (`branchList`).
    pub all: bool,
    /// Branch name (`branchCreate`) or remote name (`remoteAdd`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Checkout target (`checkout`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Remote URL (`remoteAdd`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Typed payload attached to an outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StructuredData {
    Commits {
        commits: Vec<CommitRecord>,
    },
    Branches {
        branches: Vec<BranchInfo>,
        current: Option<String>,
    },
    Remotes {
        remotes: Vec<RemoteInfo>,
    },
    Remote(RemoteInfo),
}

/// Result of one gateway call, as shown to front-ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationOutcome {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<StructuredData>,
    /// Stable error code when the failure came from [`OperationError`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OperationOutcome {
    #[must_use]
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            error: None,
        }
    }

    /// A completed run the tool itself declined, e.g. nothing to commit.
    #[must_use]
    pub fn declined(message: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::succeeded(message)
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: StructuredData) -> Self {
        self.data = Some(data);
        self
    }
}

impl From<&OperationError> for OperationOutcome {
    fn from(err: &OperationError) -> Self {
        Self {
            success: false,
            message: err.to_string(),
            data: None,
            error: Some(err.code().to_string()),
        }
    }
}
