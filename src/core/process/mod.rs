// gitdeck: Local Git Command Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning and management.
//!
//! ```text
//! ProcessBuilder::new("git")
//!   .args() .cwd() .env() .timeout()
//!   .run()
//!       --> check cwd is a directory
//!       --> tokio::process::Command (argv, never a shell)
//!           drain stdout/stderr as bytes
//!           kill on timeout
//!       --> CommandResult { exit_code, stdout, stderr, duration_ms }
//! ```

pub mod builder;
mod io;
mod runner;
