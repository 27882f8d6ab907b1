// gitdeck: Local Git Command Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Route handlers and error mapping.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{OperationError, RegistryError};
use crate::gateway::{OperationArgs, OperationGateway, OperationKind, OperationOutcome};
use crate::git::runner::CommandRunner;
use crate::registry::RegistryState;

type SharedGateway<R> = State<Arc<OperationGateway<R>>>;

/// HTTP status for a failed call.
///
/// Tool failures are completed outcomes and stay 200.
#[must_use]
pub const fn status_for(err: &OperationError) -> StatusCode {
    match err {
        OperationError::OperationInProgress => StatusCode::CONFLICT,
        OperationError::UnknownOperation { .. }
        | OperationError::Registry(RegistryError::UnknownRepository { .. }) => {
            StatusCode::NOT_FOUND
        }
        OperationError::NoRepositorySelected
        | OperationError::RepositoryMissing { .. }
        | OperationError::EmptyCommitMessage
        | OperationError::InvalidBranchName { .. }
        | OperationError::BranchNotFound { .. }
        | OperationError::AlreadyARepository { .. }
        | OperationError::DuplicateRemoteName { .. }
        | OperationError::MissingArgument { .. }
        | OperationError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
        OperationError::CommandFailed { .. } => StatusCode::OK,
        OperationError::ToolUnavailable { .. }
        | OperationError::Process(_)
        | OperationError::Registry(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Error response carrying an [`OperationOutcome`] body.
#[derive(Debug)]
pub struct ApiError(OperationError);

impl From<OperationError> for ApiError {
    fn from(err: OperationError) -> Self {
        Self(err)
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        debug!(status = %status, code = self.0.code(), "request failed");
        (status, Json(OperationOutcome::from(&self.0))).into_response()
    }
}

/// Malformed request body, reported in the outcome shape.
fn bad_request(message: String) -> Response {
    let outcome = OperationOutcome {
        success: false,
        message,
        data: None,
        error: Some("invalidRequest".to_string()),
    };
    (StatusCode::BAD_REQUEST, Json(outcome)).into_response()
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryRequest {
    pub path: PathBuf,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn list_repositories<R: CommandRunner + 'static>(
    State(gateway): SharedGateway<R>,
) -> Json<RegistryState> {
    Json(gateway.registry().state())
}

pub async fn select_repository<R: CommandRunner + 'static>(
    State(gateway): SharedGateway<R>,
    Json(request): Json<RepositoryRequest>,
) -> Result<Json<RegistryState>, ApiError> {
    let state = gateway.select_repository(&request.path).await?;
    Ok(Json(state))
}

pub async fn remove_repository<R: CommandRunner + 'static>(
    State(gateway): SharedGateway<R>,
    Json(request): Json<RepositoryRequest>,
) -> Result<Json<RegistryState>, ApiError> {
    let state = gateway.registry().remove_repository(&request.path)?;
    Ok(Json(state))
}

/// `POST /api/operations/{operation}` with optional JSON arguments.
pub async fn invoke_operation<R: CommandRunner + 'static>(
    State(gateway): SharedGateway<R>,
    Path(operation): Path<String>,
    body: Bytes,
) -> Response {
    let kind = match operation.parse::<OperationKind>() {
        Ok(kind) => kind,
        Err(err) => return ApiError(err).into_response(),
    };

    let args = if body.iter().all(u8::is_ascii_whitespace) {
        OperationArgs::default()
    } else {
        match serde_json::from_slice::<OperationArgs>(&body) {
            Ok(args) => args,
            Err(e) => return bad_request(format!("invalid operation arguments: {e}")),
        }
    };

    match gateway.try_invoke(kind, &args).await {
        Ok(outcome) => Json(outcome).into_response(),
        Err(err) => ApiError(err).into_response(),
    }
}
