//! Mission and target row models.

use spycat_core::mission::{Mission, Target};
use spycat_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `missions` table, without targets.
#[derive(Debug, Clone, FromRow)]
pub struct MissionRow {
    pub id: DbId,
    pub cat_id: Option<DbId>,
    pub completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MissionRow {
    /// Attach already-loaded targets to the mission.
    pub fn with_targets(self, targets: Vec<Target>) -> Mission {
        Mission {
            id: self.id,
            cat_id: self.cat_id,
            completed: self.completed,
            created_at: self.created_at,
            updated_at: self.updated_at,
            targets,
        }
    }
}

/// A row from the `targets` table.
#[derive(Debug, Clone, FromRow)]
pub struct TargetRow {
    pub id: DbId,
    pub mission_id: DbId,
    pub name: String,
    pub country: String,
    pub notes: String,
    pub completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<TargetRow> for Target {
    fn from(row: TargetRow) -> Self {
        Target {
            id: row.id,
            mission_id: row.mission_id,
            name: row.name,
            country: row.country,
            notes: row.notes,
            completed: row.completed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
