//! Handlers for the `/missions` resource and its sub-resources.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use spycat_core::mission::{Mission, MissionChanges, NewMission, NewTarget, Target};
use validator::Validate;

use super::parse_id;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, ValidatedJson};
use crate::state::AppState;

/// POST /missions
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<NewMission>,
) -> AppResult<(StatusCode, Json<Mission>)> {
    let mission = state
        .missions
        .create_mission(&input)
        .await
        .map_err(AppError::mission_write)?;
    Ok((StatusCode::CREATED, Json(mission)))
}

/// GET /missions
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Mission>>> {
    let missions = state.missions.list_missions().await?;
    Ok(Json(missions))
}

/// GET /missions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Mission>> {
    let id = parse_id(&id, "mission")?;
    let mission = state.missions.get_mission(id).await?;
    Ok(Json(mission))
}

/// PUT /missions/{id}
///
/// The id comes from the path; `cat_id` and `completed` from the body.
/// Absent fields keep their current value.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(changes): ValidatedJson<MissionChanges>,
) -> AppResult<Json<Mission>> {
    let id = parse_id(&id, "mission")?;
    let mission = state
        .missions
        .update_mission(id, &changes)
        .await
        .map_err(AppError::mission_write)?;
    Ok(Json(mission))
}

/// DELETE /missions/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id, "mission")?;
    state
        .missions
        .delete_mission(id)
        .await
        .map_err(AppError::mission_write)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /missions/{id}/cat/{cat_id}
pub async fn assign_cat(
    State(state): State<AppState>,
    Path((id, cat_id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id, "mission")?;
    let cat_id = parse_id(&cat_id, "cat")?;
    state
        .missions
        .assign_cat(id, cat_id)
        .await
        .map_err(AppError::mission_write)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /missions/{id}/targets
///
/// Body is an array of targets. Every element is validated before any is
/// stored; the insert itself is all-or-nothing.
pub async fn add_targets(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(targets): AppJson<Vec<NewTarget>>,
) -> AppResult<(StatusCode, Json<Vec<Target>>)> {
    let id = parse_id(&id, "mission")?;
    for target in &targets {
        target.validate()?;
    }
    let inserted = state
        .missions
        .add_targets(id, &targets)
        .await
        .map_err(AppError::mission_write)?;
    Ok((StatusCode::CREATED, Json(inserted)))
}
