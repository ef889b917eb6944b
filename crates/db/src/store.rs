//! PostgreSQL implementations of the `spycat_core` repository traits.

use std::collections::HashMap;

use async_trait::async_trait;
use spycat_core::cat::{Cat, CatRepository, NewCat};
use spycat_core::error::{CoreError, CoreResult};
use spycat_core::mission::{
    Mission, MissionRepository, MissionUpdate, NewMission, NewTarget, Target, TargetUpdate,
};
use spycat_core::types::DbId;

use crate::models::mission::TargetRow;
use crate::repositories::{CatRepo, MissionRepo, TargetRepo};
use crate::DbPool;

/// Classify a sqlx error into a domain error.
///
/// Integrity constraint violations (SQLSTATE class 23: foreign key, unique,
/// check, not-null) become [`CoreError::Integrity`] carrying the database
/// message. Everything else is logged and becomes [`CoreError::Store`].
pub fn store_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().is_some_and(|code| code.starts_with("23")) {
            return CoreError::Integrity(db_err.message().to_string());
        }
    }
    tracing::error!(error = %err, "Database error");
    CoreError::Store(err.to_string())
}

/// [`CatRepository`] backed by the `cats` table.
#[derive(Clone)]
pub struct PgCatStore {
    pool: DbPool,
}

impl PgCatStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatRepository for PgCatStore {
    async fn create(&self, input: &NewCat) -> CoreResult<Cat> {
        let row = CatRepo::create(&self.pool, input)
            .await
            .map_err(store_error)?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: DbId) -> CoreResult<Option<Cat>> {
        let row = CatRepo::find_by_id(&self.pool, id)
            .await
            .map_err(store_error)?;
        Ok(row.map(Into::into))
    }

    async fn list(&self) -> CoreResult<Vec<Cat>> {
        let rows = CatRepo::list(&self.pool).await.map_err(store_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_salary(&self, id: DbId, salary: f64) -> CoreResult<bool> {
        CatRepo::update_salary(&self.pool, id, salary)
            .await
            .map_err(store_error)
    }

    async fn delete(&self, id: DbId) -> CoreResult<bool> {
        CatRepo::delete(&self.pool, id).await.map_err(store_error)
    }
}

/// [`MissionRepository`] backed by the `missions` and `targets` tables.
#[derive(Clone)]
pub struct PgMissionStore {
    pool: DbPool,
}

impl PgMissionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn targets_of(&self, mission_id: DbId) -> CoreResult<Vec<Target>> {
        let rows = TargetRepo::list_by_mission(&self.pool, mission_id)
            .await
            .map_err(store_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl MissionRepository for PgMissionStore {
    async fn create_mission(&self, input: &NewMission) -> CoreResult<Mission> {
        let row = MissionRepo::create(&self.pool, input)
            .await
            .map_err(store_error)?;
        Ok(row.with_targets(Vec::new()))
    }

    async fn find_mission(&self, id: DbId) -> CoreResult<Option<Mission>> {
        let Some(row) = MissionRepo::find_by_id(&self.pool, id)
            .await
            .map_err(store_error)?
        else {
            return Ok(None);
        };
        let targets = self.targets_of(row.id).await?;
        Ok(Some(row.with_targets(targets)))
    }

    async fn list_missions(&self) -> CoreResult<Vec<Mission>> {
        let rows = MissionRepo::list(&self.pool).await.map_err(store_error)?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();
        let target_rows = TargetRepo::list_by_missions(&self.pool, &ids)
            .await
            .map_err(store_error)?;

        let mut by_mission: HashMap<DbId, Vec<Target>> = HashMap::new();
        for row in target_rows {
            by_mission
                .entry(row.mission_id)
                .or_default()
                .push(Target::from(row));
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let targets = by_mission.remove(&row.id).unwrap_or_default();
                row.with_targets(targets)
            })
            .collect())
    }

    async fn update_open_mission(
        &self,
        id: DbId,
        update: &MissionUpdate,
    ) -> CoreResult<Option<Mission>> {
        let Some(row) = MissionRepo::update_if_open(&self.pool, id, update)
            .await
            .map_err(store_error)?
        else {
            return Ok(None);
        };
        let targets = self.targets_of(row.id).await?;
        Ok(Some(row.with_targets(targets)))
    }

    async fn assign_cat(&self, mission_id: DbId, cat_id: DbId) -> CoreResult<bool> {
        MissionRepo::assign_cat_if_unassigned(&self.pool, mission_id, cat_id)
            .await
            .map_err(store_error)
    }

    async fn delete_unassigned_mission(&self, id: DbId) -> CoreResult<bool> {
        MissionRepo::delete_if_unassigned(&self.pool, id)
            .await
            .map_err(store_error)
    }

    async fn add_targets(
        &self,
        mission_id: DbId,
        targets: &[NewTarget],
    ) -> CoreResult<Option<Vec<Target>>> {
        let rows = TargetRepo::insert_for_open_mission(&self.pool, mission_id, targets)
            .await
            .map_err(store_error)?;
        Ok(rows.map(|rows| rows.into_iter().map(Into::into).collect()))
    }

    async fn find_target(&self, id: DbId) -> CoreResult<Option<Target>> {
        let row = TargetRepo::find_by_id(&self.pool, id)
            .await
            .map_err(store_error)?;
        Ok(row.map(Into::into))
    }

    async fn update_target(&self, id: DbId, update: &TargetUpdate) -> CoreResult<Option<Target>> {
        let row: Option<TargetRow> = TargetRepo::update_guarded(&self.pool, id, update)
            .await
            .map_err(store_error)?;
        Ok(row.map(Into::into))
    }

    async fn delete_open_target(&self, id: DbId) -> CoreResult<bool> {
        TargetRepo::delete_if_open(&self.pool, id)
            .await
            .map_err(store_error)
    }
}
