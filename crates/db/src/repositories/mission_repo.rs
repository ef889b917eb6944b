//! Repository for the `missions` table.
//!
//! Mutations are conditional on the mission rules so that a write racing
//! with another request matches no row instead of overwriting it.

use spycat_core::mission::{MissionUpdate, NewMission};
use spycat_core::types::DbId;
use sqlx::PgPool;

use crate::models::mission::MissionRow;

const COLUMNS: &str = "id, cat_id, completed, created_at, updated_at";

/// Provides CRUD operations for missions (without targets).
pub struct MissionRepo;

impl MissionRepo {
    pub async fn create(pool: &PgPool, input: &NewMission) -> Result<MissionRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO missions (cat_id, completed)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MissionRow>(&query)
            .bind(input.cat_id)
            .bind(input.completed)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MissionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM missions WHERE id = $1");
        sqlx::query_as::<_, MissionRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all missions ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<MissionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM missions ORDER BY id ASC");
        sqlx::query_as::<_, MissionRow>(&query).fetch_all(pool).await
    }

    /// Write `cat_id` and `completed` on a mission that is not completed.
    ///
    /// Returns `None` if no open mission with the given `id` exists.
    pub async fn update_if_open(
        pool: &PgPool,
        id: DbId,
        update: &MissionUpdate,
    ) -> Result<Option<MissionRow>, sqlx::Error> {
        let query = format!(
            "UPDATE missions SET cat_id = $2, completed = $3, updated_at = now()
             WHERE id = $1 AND completed = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MissionRow>(&query)
            .bind(id)
            .bind(update.cat_id)
            .bind(update.completed)
            .fetch_optional(pool)
            .await
    }

    /// Set `cat_id` on an unassigned, open mission. Returns `true` if assigned.
    pub async fn assign_cat_if_unassigned(
        pool: &PgPool,
        id: DbId,
        cat_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE missions SET cat_id = $2, updated_at = now()
             WHERE id = $1 AND (cat_id IS NULL OR cat_id = 0) AND completed = FALSE",
        )
        .bind(id)
        .bind(cat_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete an unassigned mission; its targets cascade.
    /// Returns `true` if a row was removed.
    pub async fn delete_if_unassigned(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM missions WHERE id = $1 AND (cat_id IS NULL OR cat_id = 0)")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
