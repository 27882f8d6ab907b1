// gitdeck: Local Git Command Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! HTTP/JSON front-end.
//!
//! ```text
//! GET    /health                         {"status":"ok"}
//! GET    /api/repositories               RegistryState
//! POST   /api/repositories   {"path"}    select (add + validate + activate)
//! DELETE /api/repositories   {"path"}    remove
//! POST   /api/operations/{operation}     OperationArgs? --> OperationOutcome
//!
//! 200 outcome (incl. tool failures)   409 busy   400 rejected
//! 404 unknown operation/repository    500 environment
//! ```

pub mod handlers;


use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::Result;
use crate::gateway::OperationGateway;
use crate::git::runner::CommandRunner;

/// Builds the router over a shared gateway.
pub fn router<R: CommandRunner + 'static>(gateway: Arc<OperationGateway<R>>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/repositories",
            get(handlers::list_repositories::<R>)
                .post(handlers::select_repository::<R>)
                .delete(handlers::remove_repository::<R>),
        )
        .route(
            "/api/operations/{operation}",
            post(handlers::invoke_operation::<R>),
        )
        .with_state(gateway)
}

/// Serves the API on `bind` until `shutdown` is cancelled.
///
/// # Errors
///
/// Returns an error if the address is invalid, the port cannot be bound, or
/// the server fails while running.
pub async fn serve<R: CommandRunner + 'static>(
    gateway: Arc<OperationGateway<R>>,
    bind: &str,
    shutdown: CancellationToken,
) -> Result<()> {
    let addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("invalid bind address '{bind}'"))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind HTTP listener on {addr}"))?;

    let local = listener.local_addr().context("listener has no local address")?;
    info!(addr = %local, "HTTP server listening");

    axum::serve(listener, router(gateway))
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}
