// gitdeck: Local Git Command Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Parsers for git's textual output.
//!
//! ```text
//! git log --pretty=format:%h|%an|%ar|%s  --> parse_log      --> [CommitRecord]
//! git branch [--all]                     --> parse_branches --> ([BranchInfo], current)
//! git remote -v                          --> parse_remotes  --> [RemoteInfo]
//! ```
//!
//! All parsers are total: unexpected lines are skipped, never reported.

use serde::{Deserialize, Serialize};

/// Field separator used in the `git log` pretty format.
pub const LOG_FIELD_SEPARATOR: char = '|';

/// `--pretty` argument matching [`parse_log`].
pub const LOG_FORMAT: &str = "--pretty=format:%h|%an|%ar|%s";

/// One line of `git log` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitRecord {
    pub hash: String,
    pub author: String,
    pub relative_date: String,
    pub subject: String,
}

/// One entry of `git branch` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchInfo {
    pub name: String,
    pub is_current: bool,
}

impl BranchInfo {
    /// `(HEAD detached at ...)` and similar placeholders, not checkout targets.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.name.starts_with('(') && self.name.ends_with(')')
    }
}

/// One configured remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteInfo {
    pub name: String,
    pub url: String,
}

/// Parses `git log` output, newest first as emitted.
///
/// Lines that do not split into exactly four fields are dropped, so a subject
/// containing the separator loses that commit rather than corrupting it.
#[must_use]
pub fn parse_log(text: &str) -> Vec<CommitRecord> {
    text.lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split(LOG_FIELD_SEPARATOR).collect();
            match fields.as_slice() {
                [hash, author, relative_date, subject] => Some(CommitRecord {
                    hash: (*hash).to_string(),
                    author: (*author).to_string(),
                    relative_date: (*relative_date).to_string(),
                    subject: (*subject).to_string(),
                }),
                _ => None,
            }
        })
        .collect()
}

/// Parses `git branch` output into branches and the current branch name.
#[must_use]
pub fn parse_branches(text: &str) -> (Vec<BranchInfo>, Option<String>) {
    let mut branches: Vec<BranchInfo> = Vec::new();
    let mut current = None;

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let is_current = line.starts_with('*');
        let name = if is_current { &line[1..] } else { line }.trim();
        // `remotes/origin/HEAD -> origin/main`
        let name = name.split(" -> ").next().unwrap_or(name).trim();
        if name.is_empty() {
            continue;
        }

        if is_current && current.is_none() {
            current = Some(name.to_string());
        }
        if !branches.iter().any(|b| b.name == name) {
            branches.push(BranchInfo {
                name: name.to_string(),
                is_current,
            });
        }
    }

    (branches, current)
}

/// Parses `git remote -v` output, keeping the first URL seen per remote.
#[must_use]
pub fn parse_remotes(text: &str) -> Vec<RemoteInfo> {
    let mut remotes: Vec<RemoteInfo> = Vec::new();

    for line in text.lines() {
        let mut tokens = line.split_whitespace();
        let (Some(name), Some(url)) = (tokens.next(), tokens.next()) else {
            continue;
        };
        if remotes.iter().any(|r| r.name == name) {
            continue;
        }
        remotes.push(RemoteInfo {
            name: name.to_string(),
            url: url.to_string(),
        });
    }

    remotes
}
