//! Handlers for the `/cats` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use spycat_core::cat::{Cat, NewCat};
use validator::Validate;

use super::parse_id;
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::state::AppState;

/// Body of `PUT /cats/{id}/salary`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSalaryRequest {
    #[validate(range(
        min = 0.0,
        max = 9_999_999_999.99,
        message = "salary must be between 0 and 9999999999.99"
    ))]
    pub salary: f64,
}

/// POST /cats
///
/// The breed is checked against the catalog before anything is stored.
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<NewCat>,
) -> AppResult<(StatusCode, Json<Cat>)> {
    let cat = state
        .cats
        .create(&input)
        .await
        .map_err(AppError::cat_write)?;
    Ok((StatusCode::CREATED, Json(cat)))
}

/// GET /cats
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Cat>>> {
    let cats = state.cats.list().await?;
    Ok(Json(cats))
}

/// GET /cats/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Cat>> {
    let id = parse_id(&id, "cat")?;
    let cat = state.cats.get_by_id(id).await?;
    Ok(Json(cat))
}

/// PUT /cats/{id}/salary
pub async fn update_salary(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateSalaryRequest>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id, "cat")?;
    state
        .cats
        .update_salary(id, input.salary)
        .await
        .map_err(AppError::cat_write)?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /cats/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id, "cat")?;
    state.cats.delete(id).await.map_err(AppError::cat_write)?;
    Ok(StatusCode::NO_CONTENT)
}
