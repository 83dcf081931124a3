use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use task_model::{CreateTask, Task, UpdateTask};

use crate::db::TaskStore;
use crate::error::ApiError;

/// アプリケーションの共有状態。ストアは起動時に生成して注入する。
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TaskStore>,
}

pub async fn ok() -> &'static str {
    "ok"
}

pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTask>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let Json(input) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    if input.task.trim().is_empty() {
        return Err(ApiError::BadRequest("task is required".to_string()));
    }

    let task = state
        .store
        .create(input)
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    Ok(Json(task))
}

pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state
        .store
        .list()
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(tasks))
}

/// Unknown ids are reported as a success with a `null` body, matching the
/// delete route below; see DESIGN.md for the deliberate decision.
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTask>, JsonRejection>,
) -> Result<Json<Option<Task>>, ApiError> {
    let Json(patch) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let task = state
        .store
        .update(&id, patch)
        .await
        .map_err(|e| ApiError::NotFound(e.to_string()))?;

    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<Task>>, ApiError> {
    let task = state
        .store
        .delete(&id)
        .await
        .map_err(|e| ApiError::NotFound(e.to_string()))?;

    Ok(Json(task))
}
