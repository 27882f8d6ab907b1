// gitdeck: Local Git Command Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git process plumbing.
//!
//! ```text
//!          OperationGateway
//!           |            |
//!           v            v
//!   RepositoryValidator  parse (log/branches/remotes)
//!           |
//!           v
//!   CommandRunner (trait)
//!           |
//!           v
//!      ShellRunner --> core::process::ProcessBuilder --> git
//! ```
//!
//! **`CommandRunner`**: argv-only execution seam, swapped for scripted
//! doubles in tests.
//! **`parse`**: total, pure parsers over git's porcelain-ish text output.

pub mod parse;
pub mod runner;
pub mod validator;

#[cfg(test)]
pub(crate) mod test_utils;
