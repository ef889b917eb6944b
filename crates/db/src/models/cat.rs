//! Cat row model.

use spycat_core::cat::Cat;
use spycat_core::types::DbId;
use sqlx::FromRow;

/// A row from the `cats` table. `salary` is selected as `float8`.
#[derive(Debug, Clone, FromRow)]
pub struct CatRow {
    pub id: DbId,
    pub name: String,
    pub years_of_experience: i32,
    pub breed: String,
    pub salary: f64,
}

impl From<CatRow> for Cat {
    fn from(row: CatRow) -> Self {
        Cat {
            id: row.id,
            name: row.name,
            years_of_experience: row.years_of_experience,
            breed: row.breed,
            salary: row.salary,
        }
    }
}
