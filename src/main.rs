// gitdeck: Local Git Command Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config (files, env, flags) --> Logging --> Command Dispatch
//!   Version | Options | Configs | Repo | Serve | Op
//! ```

use std::process::ExitCode;

use gitdeck::cli::{self, Command};
use gitdeck::cmd::config::{run_configs_command, run_options_command};
use gitdeck::cmd::op::run_op_command;
use gitdeck::cmd::repo::run_repo_command;
use gitdeck::cmd::serve::run_serve_command;
use gitdeck::config::Config;
use gitdeck::logging::init_logging;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let config = match cli.global.config_loader().and_then(|loader| loader.build()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&config.global.log_config()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(cli, &config).await
}

async fn dispatch_command(cli: cli::Cli, config: &Config) -> ExitCode {
    let json = cli.global.json;
    let result = match cli.command {
        Some(Command::Version) => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(Command::Options) => run_options_command(config, json),
        Some(Command::Configs) => cli.global.config_loader().map(|loader| {
            run_configs_command(&loader.format_loaded_files());
        }),
        Some(Command::Repo(args)) => run_repo_command(args, config, json).await,
        Some(Command::Serve(args)) => run_serve_command(&args, config).await,
        Some(Command::Op(op)) => match run_op_command(op, config, json).await {
            Ok(true) => Ok(()),
            Ok(false) => return ExitCode::FAILURE,
            Err(e) => Err(e),
        },
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
