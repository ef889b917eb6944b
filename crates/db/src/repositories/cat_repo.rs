//! Repository for the `cats` table.

use spycat_core::cat::NewCat;
use spycat_core::types::DbId;
use sqlx::PgPool;

use crate::models::cat::CatRow;

/// Column list shared across queries. `salary` is NUMERIC in the table and
/// read back as `float8`.
const COLUMNS: &str = "id, name, years_of_experience, breed, salary::float8 AS salary";

/// Provides CRUD operations for cats.
pub struct CatRepo;

impl CatRepo {
    /// Insert a new cat, returning the created row. The salary is rounded
    /// to two decimals.
    pub async fn create(pool: &PgPool, input: &NewCat) -> Result<CatRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO cats (name, years_of_experience, breed, salary)
             VALUES ($1, $2, $3, ROUND($4::numeric, 2))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CatRow>(&query)
            .bind(&input.name)
            .bind(input.years_of_experience)
            .bind(&input.breed)
            .bind(input.salary)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CatRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cats WHERE id = $1");
        sqlx::query_as::<_, CatRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all cats ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<CatRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cats ORDER BY id ASC");
        sqlx::query_as::<_, CatRow>(&query).fetch_all(pool).await
    }

    /// Replace a cat's salary. Returns `true` if a row was updated.
    pub async fn update_salary(pool: &PgPool, id: DbId, salary: f64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE cats SET salary = ROUND($2::numeric, 2), updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(salary)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a cat. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign key violation while missions reference the cat.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cats WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
