// gitdeck: Local Git Command Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Serve command: HTTP/JSON API until Ctrl+C.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::cli::repo::ServeArgs;
use crate::cmd::open_gateway;
use crate::config::Config;
use crate::error::Result;
use crate::server;

/// Main handler for the `serve` command.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn run_serve_command(args: &ServeArgs, config: &Config) -> Result<()> {
    let bind = args.bind.as_deref().unwrap_or(&config.server.bind);
    let gateway = Arc::new(open_gateway(config));

    let shutdown = CancellationToken::new();
    let cancel_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Received Ctrl+C, shutting down...");
            cancel_token.cancel();
        }
    });

    server::serve(gateway, bind, shutdown).await
}
