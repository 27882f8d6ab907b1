// gitdeck: Local Git Command Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |          op / repo / serve / config
//!                +----------+----------+
//!                           |
//!            server (axum)  |   config (TOML, env, CLI)
//!                  \        |
//!                   v       v
//!              ,---------------------------,
//!              |         gateway           |
//!              |  busy flag, preconditions |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!             registry       git      git::parse
//!            JSON state  runner/valid  log/branch/remote
//!                             |
//!   +-----------------------------------------+
//!   |  core   process (spawn, timeout, output)|
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod gateway;
pub mod git;
pub mod logging;
pub mod registry;
pub mod server;
pub mod utility;
