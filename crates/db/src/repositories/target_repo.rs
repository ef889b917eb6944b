//! Repository for the `targets` table.

use spycat_core::mission::{NewTarget, TargetUpdate};
use spycat_core::types::DbId;
use sqlx::PgPool;

use crate::models::mission::TargetRow;

const COLUMNS: &str = "id, mission_id, name, country, notes, completed, created_at, updated_at";

/// Provides CRUD operations for targets.
pub struct TargetRepo;

impl TargetRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TargetRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM targets WHERE id = $1");
        sqlx::query_as::<_, TargetRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the targets of one mission ordered by id.
    pub async fn list_by_mission(
        pool: &PgPool,
        mission_id: DbId,
    ) -> Result<Vec<TargetRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM targets WHERE mission_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, TargetRow>(&query)
            .bind(mission_id)
            .fetch_all(pool)
            .await
    }

    /// List the targets of several missions in one query, ordered by
    /// mission then target id.
    pub async fn list_by_missions(
        pool: &PgPool,
        mission_ids: &[DbId],
    ) -> Result<Vec<TargetRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM targets
             WHERE mission_id = ANY($1)
             ORDER BY mission_id ASC, id ASC"
        );
        sqlx::query_as::<_, TargetRow>(&query)
            .bind(mission_ids)
            .fetch_all(pool)
            .await
    }

    /// Insert targets under an open mission inside one transaction.
    ///
    /// The mission row is locked first; if it is missing or completed the
    /// transaction is rolled back and `None` is returned. Otherwise every
    /// target is inserted or, on the first failure, none is.
    pub async fn insert_for_open_mission(
        pool: &PgPool,
        mission_id: DbId,
        targets: &[NewTarget],
    ) -> Result<Option<Vec<TargetRow>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let completed: Option<bool> =
            sqlx::query_scalar("SELECT completed FROM missions WHERE id = $1 FOR UPDATE")
                .bind(mission_id)
                .fetch_optional(&mut *tx)
                .await?;
        if completed != Some(false) {
            tx.rollback().await?;
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO targets (mission_id, name, country, notes, completed)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let mut inserted = Vec::with_capacity(targets.len());
        for target in targets {
            let row = sqlx::query_as::<_, TargetRow>(&query)
                .bind(mission_id)
                .bind(&target.name)
                .bind(&target.country)
                .bind(&target.notes)
                .bind(target.completed)
                .fetch_one(&mut *tx)
                .await?;
            inserted.push(row);
        }

        tx.commit().await?;
        Ok(Some(inserted))
    }

    /// Write `notes` and `completed` on a target.
    ///
    /// The owning mission is share-locked for the duration of the update.
    /// The row only changes when the notes are identical, or when both the
    /// target and its mission are open; a completed target is never
    /// reopened. Returns `None` when no row matched.
    pub async fn update_guarded(
        pool: &PgPool,
        id: DbId,
        update: &TargetUpdate,
    ) -> Result<Option<TargetRow>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "SELECT m.id FROM missions m
             JOIN targets t ON t.mission_id = m.id
             WHERE t.id = $1
             FOR SHARE OF m",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let row = sqlx::query_as::<_, TargetRow>(
            "UPDATE targets AS t
             SET notes = $2, completed = $3, updated_at = now()
             FROM missions AS m
             WHERE t.id = $1
               AND m.id = t.mission_id
               AND (t.notes = $2 OR (t.completed = FALSE AND m.completed = FALSE))
               AND (t.completed = FALSE OR $3)
             RETURNING t.id, t.mission_id, t.name, t.country, t.notes, t.completed,
                       t.created_at, t.updated_at",
        )
        .bind(id)
        .bind(&update.notes)
        .bind(update.completed)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Delete a target that is not completed. Returns `true` if removed.
    pub async fn delete_if_open(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM targets WHERE id = $1 AND completed = FALSE")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
