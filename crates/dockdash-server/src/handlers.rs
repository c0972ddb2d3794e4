//! Request handlers for the `/api` endpoints.

use axum::Json;
use axum::extract::{Path, State};
use dockdash_common::types::{
    ContainerId, ContainerOverview, LogsResponse, MessageResponse, SettingsResponse,
};

use crate::api::AppState;
use crate::error::{ApiError, ApiResult};

/// `GET /api/containers`
///
/// Lists all containers with their remaining auto-stop time, adopting any
/// running container that has no timer yet.
pub async fn list_containers(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ContainerOverview>>> {
    let containers = state
        .engine
        .overview()
        .await
        .map_err(|e| ApiError::engine("failed to list containers", None, &e))?;
    tracing::debug!(count = containers.len(), "containers listed");
    Ok(Json(containers))
}

/// `POST /api/containers/{id}/start`
pub async fn start_container(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = ContainerId::new(id);
    state
        .engine
        .start(&id)
        .await
        .map_err(|e| ApiError::engine("failed to start container", Some(&id), &e))?;
    Ok(Json(MessageResponse {
        message: "container started".to_string(),
    }))
}

/// `POST /api/containers/{id}/stop`
pub async fn stop_container(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = ContainerId::new(id);
    state
        .engine
        .stop(&id)
        .await
        .map_err(|e| ApiError::engine("failed to stop container", Some(&id), &e))?;
    Ok(Json(MessageResponse {
        message: "container stopped".to_string(),
    }))
}

/// `GET /api/containers/{id}/logs`
pub async fn container_logs(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<LogsResponse>> {
    let id = ContainerId::new(id);
    let logs = state
        .engine
        .logs(&id)
        .await
        .map_err(|e| ApiError::engine("failed to fetch container logs", Some(&id), &e))?;
    Ok(Json(LogsResponse { logs }))
}

/// `GET /api/settings`
///
/// Reports the idle budget so clients can size their countdowns.
pub async fn settings(State(state): State<AppState>) -> Json<SettingsResponse> {
    Json(SettingsResponse {
        idle_budget: state.engine.autostop().idle_budget().as_secs(),
    })
}
