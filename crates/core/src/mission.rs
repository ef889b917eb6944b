//! Missions, their targets, and the rules coupling their lifecycles.
//!
//! A mission moves along two one-way axes:
//!
//! ```text
//! assignment:  Unassigned ──assign──▶ Assigned
//! completion:  Open ──complete──▶ Completed      (frozen: reads only)
//! ```
//!
//! An assigned mission cannot be deleted, and a completed mission rejects
//! updates, assignment and new targets. A target is `Open` or `Completed`;
//! a completed target cannot be deleted and its notes are frozen, as are the
//! notes of every target of a completed mission.
//!
//! Every operation loads the persisted state and checks the rules before
//! writing. The repository writes are conditional on the same rules, so a
//! write that loses a race affects zero rows; the service then reloads and
//! reports whichever rule now fails.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{CoreError, CoreResult};
use crate::types::{DbId, Timestamp};

pub const MSG_UPDATE_COMPLETED_MISSION: &str = "cannot update a completed mission";
pub const MSG_DELETE_ASSIGNED_MISSION: &str =
    "mission cannot be deleted because it is assigned to a cat";
pub const MSG_ALREADY_ASSIGNED: &str = "mission already assigned to a cat";
pub const MSG_TARGETS_ON_COMPLETED_MISSION: &str = "cannot add targets to a completed mission";
pub const MSG_NOTES_FROZEN: &str = "cannot update notes because target or mission is completed";
pub const MSG_DELETE_COMPLETED_TARGET: &str = "cannot delete a completed target";
pub const MSG_CONCURRENT_MODIFICATION: &str = "concurrent modification, please retry";

/// A row from the `missions` table with its targets attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mission {
    pub id: DbId,
    pub cat_id: Option<DbId>,
    pub completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Ordered by target id.
    pub targets: Vec<Target>,
}

impl Mission {
    /// A mission is assigned when it references a cat. A zero id is treated
    /// as unassigned.
    pub fn is_assigned(&self) -> bool {
        self.cat_id.is_some_and(|id| id != 0)
    }
}

/// A row from the `targets` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Target {
    pub id: DbId,
    pub mission_id: DbId,
    pub name: String,
    pub country: String,
    pub notes: String,
    pub completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a mission.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewMission {
    #[validate(range(min = 1, message = "cat_id must be a positive integer"))]
    pub cat_id: Option<DbId>,
    #[serde(default)]
    pub completed: bool,
}

/// DTO for updating a mission. Absent fields keep their persisted value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct MissionChanges {
    #[validate(range(min = 1, message = "cat_id must be a positive integer"))]
    pub cat_id: Option<DbId>,
    pub completed: Option<bool>,
}

/// Fully resolved mission state handed to the repository.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissionUpdate {
    pub cat_id: Option<DbId>,
    pub completed: bool,
}

/// DTO for a target added to a mission. The mission id always comes from
/// the mission the targets are added to.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewTarget {
    #[validate(length(min = 1, message = "target name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "target country is required"))]
    pub country: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub completed: bool,
}

/// DTO for updating a target. Only `notes` and `completed` are mutable;
/// any other field in the request body is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TargetChanges {
    pub notes: Option<String>,
    pub completed: Option<bool>,
}

/// Fully resolved target state handed to the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetUpdate {
    pub notes: String,
    pub completed: bool,
}

/// Persistence capability for missions and targets.
///
/// The mutating methods are conditional: they only touch rows for which the
/// corresponding domain rule still holds, and report `None`/`false` when
/// nothing matched (row missing or rule no longer satisfied).
#[async_trait]
pub trait MissionRepository: Send + Sync {
    async fn create_mission(&self, input: &NewMission) -> CoreResult<Mission>;

    /// Mission with its targets, or `None`.
    async fn find_mission(&self, id: DbId) -> CoreResult<Option<Mission>>;

    /// All missions ordered by id, each with its targets.
    async fn list_missions(&self) -> CoreResult<Vec<Mission>>;

    /// Apply `update` to the mission if it exists and is not completed.
    async fn update_open_mission(
        &self,
        id: DbId,
        update: &MissionUpdate,
    ) -> CoreResult<Option<Mission>>;

    /// Set `cat_id` if the mission exists, is unassigned and is not completed.
    async fn assign_cat(&self, mission_id: DbId, cat_id: DbId) -> CoreResult<bool>;

    /// Delete the mission (and its targets) if it exists and is unassigned.
    async fn delete_unassigned_mission(&self, id: DbId) -> CoreResult<bool>;

    /// Insert all targets under `mission_id` atomically, provided the mission
    /// exists and is not completed. Returns the inserted rows in input order.
    async fn add_targets(
        &self,
        mission_id: DbId,
        targets: &[NewTarget],
    ) -> CoreResult<Option<Vec<Target>>>;

    async fn find_target(&self, id: DbId) -> CoreResult<Option<Target>>;

    /// Write `notes`/`completed` if the notes are unchanged or both the
    /// target and its mission are still open, and the write does not reopen
    /// a completed target.
    async fn update_target(&self, id: DbId, update: &TargetUpdate) -> CoreResult<Option<Target>>;

    /// Delete the target if it exists and is not completed.
    async fn delete_open_target(&self, id: DbId) -> CoreResult<bool>;
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// A completed mission accepts no further mutation through update or assign.
pub fn ensure_mission_open(mission: &Mission) -> CoreResult<()> {
    if mission.completed {
        return Err(CoreError::Conflict(MSG_UPDATE_COMPLETED_MISSION.to_string()));
    }
    Ok(())
}

/// An assigned mission cannot be deleted.
pub fn ensure_mission_deletable(mission: &Mission) -> CoreResult<()> {
    if mission.is_assigned() {
        return Err(CoreError::Conflict(MSG_DELETE_ASSIGNED_MISSION.to_string()));
    }
    Ok(())
}

/// A mission can be assigned once.
pub fn ensure_mission_assignable(mission: &Mission) -> CoreResult<()> {
    if mission.is_assigned() {
        return Err(CoreError::Conflict(MSG_ALREADY_ASSIGNED.to_string()));
    }
    ensure_mission_open(mission)
}

/// Targets can only be added to an open mission.
pub fn ensure_targets_addable(mission: &Mission) -> CoreResult<()> {
    if mission.completed {
        return Err(CoreError::Conflict(
            MSG_TARGETS_ON_COMPLETED_MISSION.to_string(),
        ));
    }
    Ok(())
}

/// A completed target cannot be deleted.
pub fn ensure_target_deletable(target: &Target) -> CoreResult<()> {
    if target.completed {
        return Err(CoreError::Conflict(MSG_DELETE_COMPLETED_TARGET.to_string()));
    }
    Ok(())
}

/// Resolve a mission update against the persisted mission.
pub fn resolve_mission_update(
    existing: &Mission,
    changes: &MissionChanges,
) -> CoreResult<MissionUpdate> {
    ensure_mission_open(existing)?;
    Ok(MissionUpdate {
        cat_id: changes.cat_id.or(existing.cat_id),
        completed: changes.completed.unwrap_or(existing.completed),
    })
}

/// Resolve a target update against the persisted target and its mission.
///
/// Notes freeze once either the target or its mission is completed;
/// re-sending identical notes is allowed. Completion never reverts.
pub fn resolve_target_update(
    existing: &Target,
    mission: &Mission,
    changes: &TargetChanges,
) -> CoreResult<TargetUpdate> {
    let notes = changes
        .notes
        .clone()
        .unwrap_or_else(|| existing.notes.clone());

    if (existing.completed || mission.completed) && notes != existing.notes {
        return Err(CoreError::Conflict(MSG_NOTES_FROZEN.to_string()));
    }

    Ok(TargetUpdate {
        notes,
        completed: existing.completed || changes.completed.unwrap_or(false),
    })
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Mission and target operations over a [`MissionRepository`].
#[derive(Clone)]
pub struct MissionService {
    repo: Arc<dyn MissionRepository>,
}

impl MissionService {
    pub fn new(repo: Arc<dyn MissionRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_mission(&self, input: &NewMission) -> CoreResult<Mission> {
        let mission = self.repo.create_mission(input).await?;
        tracing::info!(mission_id = mission.id, "Mission created");
        Ok(mission)
    }

    pub async fn get_mission(&self, id: DbId) -> CoreResult<Mission> {
        self.load_mission(id).await
    }

    pub async fn list_missions(&self) -> CoreResult<Vec<Mission>> {
        self.repo.list_missions().await
    }

    pub async fn update_mission(&self, id: DbId, changes: &MissionChanges) -> CoreResult<Mission> {
        let existing = self.load_mission(id).await?;
        let update = resolve_mission_update(&existing, changes)?;

        match self.repo.update_open_mission(id, &update).await? {
            Some(mission) => Ok(mission),
            None => {
                let current = self.load_mission(id).await?;
                resolve_mission_update(&current, changes)?;
                Err(concurrent_modification())
            }
        }
    }

    pub async fn delete_mission(&self, id: DbId) -> CoreResult<()> {
        let existing = self.load_mission(id).await?;
        ensure_mission_deletable(&existing)?;

        if self.repo.delete_unassigned_mission(id).await? {
            tracing::info!(mission_id = id, "Mission deleted");
            return Ok(());
        }
        let current = self.load_mission(id).await?;
        ensure_mission_deletable(&current)?;
        Err(concurrent_modification())
    }

    /// Assign a cat to an unassigned, open mission.
    ///
    /// The cat id is not checked here; the store rejects unknown cats.
    pub async fn assign_cat(&self, mission_id: DbId, cat_id: DbId) -> CoreResult<()> {
        let existing = self.load_mission(mission_id).await?;
        ensure_mission_assignable(&existing)?;

        if self.repo.assign_cat(mission_id, cat_id).await? {
            tracing::info!(mission_id, cat_id, "Cat assigned to mission");
            return Ok(());
        }
        let current = self.load_mission(mission_id).await?;
        ensure_mission_assignable(&current)?;
        Err(concurrent_modification())
    }

    /// Add targets to an open mission. Either every target is stored or none.
    ///
    /// An empty batch still requires an open mission and stores nothing.
    pub async fn add_targets(
        &self,
        mission_id: DbId,
        targets: &[NewTarget],
    ) -> CoreResult<Vec<Target>> {
        let mission = self.load_mission(mission_id).await?;
        ensure_targets_addable(&mission)?;
        if targets.is_empty() {
            return Ok(Vec::new());
        }

        match self.repo.add_targets(mission_id, targets).await? {
            Some(inserted) => {
                tracing::info!(mission_id, count = inserted.len(), "Targets added");
                Ok(inserted)
            }
            None => {
                let current = self.load_mission(mission_id).await?;
                ensure_targets_addable(&current)?;
                Err(concurrent_modification())
            }
        }
    }

    pub async fn update_target(&self, id: DbId, changes: &TargetChanges) -> CoreResult<Target> {
        let (existing, mission) = self.load_target_with_mission(id).await?;
        let update = resolve_target_update(&existing, &mission, changes)?;

        match self.repo.update_target(id, &update).await? {
            Some(target) => Ok(target),
            None => {
                let (current, mission) = self.load_target_with_mission(id).await?;
                resolve_target_update(&current, &mission, changes)?;
                Err(concurrent_modification())
            }
        }
    }

    pub async fn delete_target(&self, id: DbId) -> CoreResult<()> {
        let existing = self.load_target(id).await?;
        ensure_target_deletable(&existing)?;

        if self.repo.delete_open_target(id).await? {
            return Ok(());
        }
        let current = self.load_target(id).await?;
        ensure_target_deletable(&current)?;
        Err(concurrent_modification())
    }

    async fn load_mission(&self, id: DbId) -> CoreResult<Mission> {
        self.repo
            .find_mission(id)
            .await?
            .ok_or(CoreError::not_found("Mission", id))
    }

    async fn load_target(&self, id: DbId) -> CoreResult<Target> {
        self.repo
            .find_target(id)
            .await?
            .ok_or(CoreError::not_found("Target", id))
    }

    /// Load a target and its owning mission, resolved through the persisted
    /// `mission_id`.
    async fn load_target_with_mission(&self, id: DbId) -> CoreResult<(Target, Mission)> {
        let target = self.load_target(id).await?;
        let mission = self.load_mission(target.mission_id).await?;
        Ok((target, mission))
    }
}

fn concurrent_modification() -> CoreError {
    tracing::warn!("Conditional write matched no row after passing rule checks");
    CoreError::Conflict(MSG_CONCURRENT_MODIFICATION.to_string())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::cat::{CatRepository, NewCat};
    use crate::memory::MemoryStore;

    fn target(name: &str) -> NewTarget {
        NewTarget {
            name: name.to_string(),
            country: "France".to_string(),
            notes: String::new(),
            completed: false,
        }
    }

    fn completed_changes() -> MissionChanges {
        MissionChanges {
            cat_id: None,
            completed: Some(true),
        }
    }

    fn notes(value: &str) -> TargetChanges {
        TargetChanges {
            notes: Some(value.to_string()),
            completed: None,
        }
    }

    fn assert_conflict<T: std::fmt::Debug>(result: CoreResult<T>, expected: &str) {
        assert_matches!(result, Err(CoreError::Conflict(ref msg)) if msg == expected);
    }

    async fn setup() -> (Arc<MemoryStore>, MissionService) {
        let store = Arc::new(MemoryStore::new());
        let svc = MissionService::new(store.clone());
        (store, svc)
    }

    async fn add_cat(store: &MemoryStore) -> DbId {
        store
            .create(&NewCat {
                name: "Tom".to_string(),
                years_of_experience: 3,
                breed: "Siamese".to_string(),
                salary: 1000.0,
            })
            .await
            .unwrap()
            .id
    }

    // -- rule functions ------------------------------------------------------

    fn sample_mission(cat_id: Option<DbId>, completed: bool) -> Mission {
        let now = chrono::Utc::now();
        Mission {
            id: 1,
            cat_id,
            completed,
            created_at: now,
            updated_at: now,
            targets: Vec::new(),
        }
    }

    fn sample_target(notes: &str, completed: bool) -> Target {
        let now = chrono::Utc::now();
        Target {
            id: 10,
            mission_id: 1,
            name: "Jerry".to_string(),
            country: "France".to_string(),
            notes: notes.to_string(),
            completed,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn zero_cat_id_counts_as_unassigned() {
        assert!(!sample_mission(Some(0), false).is_assigned());
        assert!(!sample_mission(None, false).is_assigned());
        assert!(sample_mission(Some(7), false).is_assigned());
    }

    #[test]
    fn mission_update_keeps_absent_fields() {
        let existing = sample_mission(Some(7), false);
        let update = resolve_mission_update(&existing, &MissionChanges::default()).unwrap();
        assert_eq!(
            update,
            MissionUpdate {
                cat_id: Some(7),
                completed: false
            }
        );
    }

    #[test]
    fn target_notes_may_change_together_with_completion() {
        let update = resolve_target_update(
            &sample_target("", false),
            &sample_mission(None, false),
            &TargetChanges {
                notes: Some("x".to_string()),
                completed: Some(true),
            },
        )
        .unwrap();
        assert_eq!(update.notes, "x");
        assert!(update.completed);
    }

    #[test]
    fn target_completion_never_reverts() {
        let update = resolve_target_update(
            &sample_target("x", true),
            &sample_mission(None, false),
            &TargetChanges {
                notes: None,
                completed: Some(false),
            },
        )
        .unwrap();
        assert!(update.completed);
    }

    #[test]
    fn notes_freeze_when_mission_completed() {
        let result = resolve_target_update(
            &sample_target("x", false),
            &sample_mission(None, true),
            &notes("y"),
        );
        assert_conflict(result, MSG_NOTES_FROZEN);
    }

    #[test]
    fn open_target_of_completed_mission_can_still_complete() {
        let update = resolve_target_update(
            &sample_target("x", false),
            &sample_mission(None, true),
            &TargetChanges {
                notes: None,
                completed: Some(true),
            },
        )
        .unwrap();
        assert!(update.completed);
        assert_eq!(update.notes, "x");
    }

    // -- service: missions ---------------------------------------------------

    #[tokio::test]
    async fn create_mission_starts_open_and_unassigned() {
        let (_, svc) = setup().await;
        let mission = svc.create_mission(&NewMission::default()).await.unwrap();
        assert!(mission.id > 0);
        assert_eq!(mission.cat_id, None);
        assert!(!mission.completed);
        assert!(mission.targets.is_empty());
    }

    #[tokio::test]
    async fn completed_mission_rejects_update_and_stays_completed() {
        let (_, svc) = setup().await;
        let mission = svc.create_mission(&NewMission::default()).await.unwrap();

        let updated = svc
            .update_mission(mission.id, &completed_changes())
            .await
            .unwrap();
        assert!(updated.completed);

        let reopen = MissionChanges {
            cat_id: None,
            completed: Some(false),
        };
        assert_conflict(
            svc.update_mission(mission.id, &reopen).await,
            MSG_UPDATE_COMPLETED_MISSION,
        );
        assert!(svc.get_mission(mission.id).await.unwrap().completed);
    }

    #[tokio::test]
    async fn completed_mission_rejects_targets_and_assignment() {
        let (store, svc) = setup().await;
        let cat_id = add_cat(&store).await;
        let mission = svc.create_mission(&NewMission::default()).await.unwrap();
        svc.update_mission(mission.id, &completed_changes())
            .await
            .unwrap();

        assert_conflict(
            svc.add_targets(mission.id, &[target("Jerry")]).await,
            MSG_TARGETS_ON_COMPLETED_MISSION,
        );
        assert_conflict(
            svc.assign_cat(mission.id, cat_id).await,
            MSG_UPDATE_COMPLETED_MISSION,
        );

        let current = svc.get_mission(mission.id).await.unwrap();
        assert_eq!(current.cat_id, None);
        assert!(current.targets.is_empty());
    }

    #[tokio::test]
    async fn assigned_mission_cannot_be_deleted() {
        let (store, svc) = setup().await;
        let cat_id = add_cat(&store).await;
        let mission = svc.create_mission(&NewMission::default()).await.unwrap();
        svc.assign_cat(mission.id, cat_id).await.unwrap();

        assert_conflict(
            svc.delete_mission(mission.id).await,
            MSG_DELETE_ASSIGNED_MISSION,
        );
        assert!(svc.get_mission(mission.id).await.is_ok());
    }

    #[tokio::test]
    async fn second_assignment_fails_without_state_change() {
        let (store, svc) = setup().await;
        let first = add_cat(&store).await;
        let second = add_cat(&store).await;
        let mission = svc.create_mission(&NewMission::default()).await.unwrap();

        svc.assign_cat(mission.id, first).await.unwrap();
        assert_conflict(
            svc.assign_cat(mission.id, second).await,
            MSG_ALREADY_ASSIGNED,
        );
        assert_eq!(
            svc.get_mission(mission.id).await.unwrap().cat_id,
            Some(first)
        );
    }

    #[tokio::test]
    async fn assigning_unknown_cat_is_an_integrity_error() {
        let (_, svc) = setup().await;
        let mission = svc.create_mission(&NewMission::default()).await.unwrap();

        assert_matches!(
            svc.assign_cat(mission.id, 4242).await,
            Err(CoreError::Integrity(_))
        );
        assert_eq!(svc.get_mission(mission.id).await.unwrap().cat_id, None);
    }

    #[tokio::test]
    async fn concurrent_assignments_have_one_winner() {
        let (store, svc) = setup().await;
        let a = add_cat(&store).await;
        let b = add_cat(&store).await;
        let mission = svc.create_mission(&NewMission::default()).await.unwrap();

        let (ra, rb) = tokio::join!(svc.assign_cat(mission.id, a), svc.assign_cat(mission.id, b));
        assert_eq!(usize::from(ra.is_ok()) + usize::from(rb.is_ok()), 1);

        let winner = if ra.is_ok() { a } else { b };
        assert_eq!(
            svc.get_mission(mission.id).await.unwrap().cat_id,
            Some(winner)
        );
    }

    #[tokio::test]
    async fn unassigned_mission_delete_cascades_targets() {
        let (store, svc) = setup().await;
        let mission = svc.create_mission(&NewMission::default()).await.unwrap();
        let inserted = svc
            .add_targets(mission.id, &[target("Jerry")])
            .await
            .unwrap();

        svc.delete_mission(mission.id).await.unwrap();
        assert_matches!(
            svc.get_mission(mission.id).await,
            Err(CoreError::NotFound { entity: "Mission", .. })
        );
        assert!(store.find_target(inserted[0].id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn operations_on_missing_mission_report_not_found() {
        let (_, svc) = setup().await;
        assert_matches!(svc.get_mission(5).await, Err(CoreError::NotFound { .. }));
        assert_matches!(
            svc.update_mission(5, &completed_changes()).await,
            Err(CoreError::NotFound { .. })
        );
        assert_matches!(svc.delete_mission(5).await, Err(CoreError::NotFound { .. }));
        assert_matches!(svc.assign_cat(5, 1).await, Err(CoreError::NotFound { .. }));
        assert_matches!(
            svc.add_targets(5, &[target("Jerry")]).await,
            Err(CoreError::NotFound { .. })
        );
    }

    // -- service: targets ----------------------------------------------------

    #[tokio::test]
    async fn added_targets_belong_to_their_mission_only() {
        let (_, svc) = setup().await;
        let one = svc.create_mission(&NewMission::default()).await.unwrap();
        let two = svc.create_mission(&NewMission::default()).await.unwrap();

        svc.add_targets(one.id, &[target("Jerry"), target("Spike")])
            .await
            .unwrap();
        svc.add_targets(two.id, &[target("Tyke")]).await.unwrap();

        let loaded = svc.get_mission(one.id).await.unwrap();
        let names: Vec<_> = loaded.targets.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Jerry", "Spike"]);
        assert!(loaded.targets.iter().all(|t| t.mission_id == one.id));

        let listed = svc.list_missions().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[1].targets.len(), 1);
        assert_eq!(listed[1].targets[0].mission_id, two.id);
    }

    #[tokio::test]
    async fn empty_target_batch_stores_nothing_on_open_mission_only() {
        let (_, svc) = setup().await;
        let mission = svc.create_mission(&NewMission::default()).await.unwrap();
        assert_eq!(svc.add_targets(mission.id, &[]).await.unwrap(), Vec::new());
        assert!(svc.get_mission(mission.id).await.unwrap().targets.is_empty());

        svc.update_mission(mission.id, &completed_changes())
            .await
            .unwrap();
        assert_matches!(
            svc.add_targets(mission.id, &[]).await,
            Err(CoreError::Conflict(ref msg)) if msg == MSG_TARGETS_ON_COMPLETED_MISSION
        );
        assert_matches!(
            svc.add_targets(404, &[]).await,
            Err(CoreError::NotFound { entity: "Mission", id: 404 })
        );
    }

    #[tokio::test]
    async fn completed_target_freezes_notes_and_blocks_delete() {
        let (_, svc) = setup().await;
        let mission = svc.create_mission(&NewMission::default()).await.unwrap();
        let id = svc
            .add_targets(mission.id, &[target("Jerry")])
            .await
            .unwrap()[0]
            .id;

        let done = svc
            .update_target(
                id,
                &TargetChanges {
                    notes: Some("x".to_string()),
                    completed: Some(true),
                },
            )
            .await
            .unwrap();
        assert!(done.completed);
        assert_eq!(done.notes, "x");

        assert_conflict(svc.update_target(id, &notes("y")).await, MSG_NOTES_FROZEN);
        assert_conflict(svc.delete_target(id).await, MSG_DELETE_COMPLETED_TARGET);

        // Re-posting the same notes is a legal no-op.
        let same = svc.update_target(id, &notes("x")).await.unwrap();
        assert_eq!(same.notes, "x");
        assert!(same.completed);
    }

    #[tokio::test]
    async fn open_target_notes_are_editable_and_deletable() {
        let (_, svc) = setup().await;
        let mission = svc.create_mission(&NewMission::default()).await.unwrap();
        let id = svc
            .add_targets(mission.id, &[target("Jerry")])
            .await
            .unwrap()[0]
            .id;

        let updated = svc.update_target(id, &notes("spotted")).await.unwrap();
        assert_eq!(updated.notes, "spotted");
        assert!(!updated.completed);

        svc.delete_target(id).await.unwrap();
        assert_matches!(
            svc.delete_target(id).await,
            Err(CoreError::NotFound { entity: "Target", .. })
        );
    }

    #[tokio::test]
    async fn completing_mission_freezes_target_notes() {
        let (_, svc) = setup().await;
        let mission = svc.create_mission(&NewMission::default()).await.unwrap();
        let id = svc
            .add_targets(mission.id, &[target("Jerry")])
            .await
            .unwrap()[0]
            .id;
        svc.update_mission(mission.id, &completed_changes())
            .await
            .unwrap();

        assert_conflict(svc.update_target(id, &notes("late")).await, MSG_NOTES_FROZEN);
    }

    #[tokio::test]
    async fn target_name_and_mission_are_immutable() {
        let (_, svc) = setup().await;
        let mission = svc.create_mission(&NewMission::default()).await.unwrap();
        let original = svc
            .add_targets(mission.id, &[target("Jerry")])
            .await
            .unwrap()
            .remove(0);

        let updated = svc
            .update_target(original.id, &notes("seen"))
            .await
            .unwrap();
        assert_eq!(updated.name, original.name);
        assert_eq!(updated.country, original.country);
        assert_eq!(updated.mission_id, mission.id);
    }
}
