//! Handlers for the `/targets` resource.
//!
//! Targets are created through `POST /missions/{id}/targets`; this resource
//! only updates and deletes them.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use spycat_core::mission::{Target, TargetChanges};

use super::parse_id;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::state::AppState;

/// PUT /targets/{id}
///
/// Only `notes` and `completed` are read from the body.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(changes): AppJson<TargetChanges>,
) -> AppResult<Json<Target>> {
    let id = parse_id(&id, "target")?;
    let target = state
        .missions
        .update_target(id, &changes)
        .await
        .map_err(AppError::mission_write)?;
    Ok(Json(target))
}

/// DELETE /targets/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id, "target")?;
    state
        .missions
        .delete_target(id)
        .await
        .map_err(AppError::mission_write)?;
    Ok(StatusCode::NO_CONTENT)
}
