//! In-memory implementations of the repository and breed catalog
//! capabilities.
//!
//! [`MemoryStore`] keeps cats, missions and targets in one mutex-guarded
//! state and enforces the same referential constraints and conditional
//! writes as the PostgreSQL store, so services behave identically on both.
//! Enabled for tests and through the `memory-store` feature.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::cat::{BreedValidator, Cat, CatRepository, NewCat};
use crate::error::{CoreError, CoreResult};
use crate::mission::{
    Mission, MissionRepository, MissionUpdate, NewMission, NewTarget, Target, TargetUpdate,
};
use crate::types::{DbId, Timestamp};

#[derive(Default)]
struct State {
    next_id: DbId,
    cats: BTreeMap<DbId, Cat>,
    missions: BTreeMap<DbId, MissionRow>,
    targets: BTreeMap<DbId, Target>,
}

#[derive(Clone)]
struct MissionRow {
    id: DbId,
    cat_id: Option<DbId>,
    completed: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl State {
    fn allocate_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }

    fn check_cat_reference(&self, cat_id: Option<DbId>) -> CoreResult<()> {
        match cat_id {
            Some(id) if !self.cats.contains_key(&id) => Err(CoreError::Integrity(format!(
                "cat {id} referenced by mission does not exist"
            ))),
            _ => Ok(()),
        }
    }

    fn assemble(&self, row: &MissionRow) -> Mission {
        Mission {
            id: row.id,
            cat_id: row.cat_id,
            completed: row.completed,
            created_at: row.created_at,
            updated_at: row.updated_at,
            targets: self
                .targets
                .values()
                .filter(|t| t.mission_id == row.id)
                .cloned()
                .collect(),
        }
    }
}

/// Mutex-guarded in-memory store for cats, missions and targets.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CatRepository for MemoryStore {
    async fn create(&self, input: &NewCat) -> CoreResult<Cat> {
        let mut state = self.lock();
        let cat = Cat {
            id: state.allocate_id(),
            name: input.name.clone(),
            years_of_experience: input.years_of_experience,
            breed: input.breed.clone(),
            salary: (input.salary * 100.0).round() / 100.0,
        };
        state.cats.insert(cat.id, cat.clone());
        Ok(cat)
    }

    async fn find_by_id(&self, id: DbId) -> CoreResult<Option<Cat>> {
        Ok(self.lock().cats.get(&id).cloned())
    }

    async fn list(&self) -> CoreResult<Vec<Cat>> {
        Ok(self.lock().cats.values().cloned().collect())
    }

    async fn update_salary(&self, id: DbId, salary: f64) -> CoreResult<bool> {
        let mut state = self.lock();
        match state.cats.get_mut(&id) {
            Some(cat) => {
                cat.salary = (salary * 100.0).round() / 100.0;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: DbId) -> CoreResult<bool> {
        let mut state = self.lock();
        if state.missions.values().any(|m| m.cat_id == Some(id)) {
            return Err(CoreError::Integrity(format!(
                "cat {id} is still referenced by a mission"
            )));
        }
        Ok(state.cats.remove(&id).is_some())
    }
}

#[async_trait]
impl MissionRepository for MemoryStore {
    async fn create_mission(&self, input: &NewMission) -> CoreResult<Mission> {
        let mut state = self.lock();
        state.check_cat_reference(input.cat_id)?;
        let now = chrono::Utc::now();
        let row = MissionRow {
            id: state.allocate_id(),
            cat_id: input.cat_id,
            completed: input.completed,
            created_at: now,
            updated_at: now,
        };
        state.missions.insert(row.id, row.clone());
        Ok(state.assemble(&row))
    }

    async fn find_mission(&self, id: DbId) -> CoreResult<Option<Mission>> {
        let state = self.lock();
        Ok(state.missions.get(&id).map(|row| state.assemble(row)))
    }

    async fn list_missions(&self) -> CoreResult<Vec<Mission>> {
        let state = self.lock();
        Ok(state.missions.values().map(|row| state.assemble(row)).collect())
    }

    async fn update_open_mission(
        &self,
        id: DbId,
        update: &MissionUpdate,
    ) -> CoreResult<Option<Mission>> {
        let mut state = self.lock();
        state.check_cat_reference(update.cat_id)?;
        let Some(row) = state.missions.get_mut(&id).filter(|row| !row.completed) else {
            return Ok(None);
        };
        row.cat_id = update.cat_id;
        row.completed = update.completed;
        row.updated_at = chrono::Utc::now();
        let row = row.clone();
        Ok(Some(state.assemble(&row)))
    }

    async fn assign_cat(&self, mission_id: DbId, cat_id: DbId) -> CoreResult<bool> {
        let mut state = self.lock();
        let assignable = state
            .missions
            .get(&mission_id)
            .is_some_and(|row| row.cat_id.is_none() && !row.completed);
        if !assignable {
            return Ok(false);
        }
        state.check_cat_reference(Some(cat_id))?;
        if let Some(row) = state.missions.get_mut(&mission_id) {
            row.cat_id = Some(cat_id);
            row.updated_at = chrono::Utc::now();
        }
        Ok(true)
    }

    async fn delete_unassigned_mission(&self, id: DbId) -> CoreResult<bool> {
        let mut state = self.lock();
        let deletable = state
            .missions
            .get(&id)
            .is_some_and(|row| row.cat_id.is_none());
        if !deletable {
            return Ok(false);
        }
        state.missions.remove(&id);
        state.targets.retain(|_, t| t.mission_id != id);
        Ok(true)
    }

    async fn add_targets(
        &self,
        mission_id: DbId,
        targets: &[NewTarget],
    ) -> CoreResult<Option<Vec<Target>>> {
        let mut state = self.lock();
        let open = state
            .missions
            .get(&mission_id)
            .is_some_and(|row| !row.completed);
        if !open {
            return Ok(None);
        }
        let now = chrono::Utc::now();
        let mut inserted = Vec::with_capacity(targets.len());
        for input in targets {
            let target = Target {
                id: state.allocate_id(),
                mission_id,
                name: input.name.clone(),
                country: input.country.clone(),
                notes: input.notes.clone(),
                completed: input.completed,
                created_at: now,
                updated_at: now,
            };
            state.targets.insert(target.id, target.clone());
            inserted.push(target);
        }
        Ok(Some(inserted))
    }

    async fn find_target(&self, id: DbId) -> CoreResult<Option<Target>> {
        Ok(self.lock().targets.get(&id).cloned())
    }

    async fn update_target(&self, id: DbId, update: &TargetUpdate) -> CoreResult<Option<Target>> {
        let mut state = self.lock();
        let frozen_missions: HashSet<DbId> = state
            .missions
            .values()
            .filter(|row| row.completed)
            .map(|row| row.id)
            .collect();
        let Some(target) = state.targets.get_mut(&id) else {
            return Ok(None);
        };
        let frozen = target.completed || frozen_missions.contains(&target.mission_id);
        if (frozen && target.notes != update.notes) || (target.completed && !update.completed) {
            return Ok(None);
        }
        target.notes = update.notes.clone();
        target.completed = update.completed;
        target.updated_at = chrono::Utc::now();
        Ok(Some(target.clone()))
    }

    async fn delete_open_target(&self, id: DbId) -> CoreResult<bool> {
        let mut state = self.lock();
        match state.targets.get(&id) {
            Some(target) if !target.completed => {
                state.targets.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// Breed catalog answering from a fixed list of names.
pub struct StaticBreedCatalog {
    names: Option<Vec<String>>,
}

impl StaticBreedCatalog {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: Some(names.into_iter().map(Into::into).collect()),
        }
    }

    /// A catalog whose every lookup fails as if the service were down.
    pub fn unreachable() -> Self {
        Self { names: None }
    }
}

#[async_trait]
impl BreedValidator for StaticBreedCatalog {
    async fn validate_breed(&self, breed: &str) -> CoreResult<bool> {
        match &self.names {
            Some(names) => Ok(names.iter().any(|name| name == breed)),
            None => Err(CoreError::Upstream(
                "error validating breed: breed catalog unreachable".to_string(),
            )),
        }
    }
}
