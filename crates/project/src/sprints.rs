//! The invariant-checked sprint collection of a project.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use sprintboard_core::{DomainError, DomainResult, Entity};

use crate::ids::SprintId;
use crate::sprint::Sprint;

/// Sprints of a project, keyed by sprint id.
///
/// Invariant, re-checked on every mutation and on deserialization: at most
/// one sprint is `Active`. `start` is therefore the only path that could
/// mint a second active sprint, and construction catches it there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Sprint>", into = "Vec<Sprint>")]
pub struct Sprints {
    values: HashMap<SprintId, Sprint>,
}

impl Sprints {
    /// Sole construction gate; enforces the collection invariant.
    fn validated(values: HashMap<SprintId, Sprint>) -> DomainResult<Sprints> {
        let active_count = values.values().filter(|s| s.is_active()).count();
        if active_count > 1 {
            return Err(DomainError::invariant(format!(
                "at most one sprint can be active, found {active_count}"
            )));
        }
        Ok(Sprints { values })
    }

    pub fn of_empty() -> Sprints {
        Sprints {
            values: HashMap::new(),
        }
    }

    pub fn from_vec(sprints: Vec<Sprint>) -> DomainResult<Sprints> {
        Self::validated(sprints.into_iter().map(|s| (*s.id(), s)).collect())
    }

    /// Insert a new sprint; the id must not already be present.
    pub fn add(&self, sprint: Sprint) -> DomainResult<Sprints> {
        if self.contains_by_id(sprint.id()) {
            return Err(DomainError::conflict(format!(
                "sprint {} already exists",
                sprint.id()
            )));
        }
        let mut values = self.values.clone();
        values.insert(*sprint.id(), sprint);
        Self::validated(values)
    }

    /// Replace an existing sprint wholesale (no field merging).
    pub fn edit(&self, sprint: Sprint) -> DomainResult<(Sprints, Sprint)> {
        if !self.contains_by_id(sprint.id()) {
            return Err(DomainError::not_found(format!(
                "no sprint {} in the project",
                sprint.id()
            )));
        }
        let mut values = self.values.clone();
        values.insert(*sprint.id(), sprint.clone());
        Ok((Self::validated(values)?, sprint))
    }

    /// Move a sprint to `Active` through its own transition guard.
    pub fn start(&self, sprint_id: &SprintId) -> DomainResult<(Sprints, Sprint)> {
        self.transition(sprint_id, Sprint::with_active)
    }

    /// Move a sprint to `Done` through its own transition guard.
    pub fn done(&self, sprint_id: &SprintId) -> DomainResult<(Sprints, Sprint)> {
        self.transition(sprint_id, Sprint::with_done)
    }

    fn transition(
        &self,
        sprint_id: &SprintId,
        apply: impl Fn(&Sprint) -> DomainResult<Sprint>,
    ) -> DomainResult<(Sprints, Sprint)> {
        let sprint = self.find_by_id(sprint_id).ok_or_else(|| {
            DomainError::not_found(format!("no sprint {sprint_id} in the project"))
        })?;
        let next = apply(sprint)?;
        let mut values = self.values.clone();
        values.insert(*sprint_id, next.clone());
        Ok((Self::validated(values)?, next))
    }

    pub fn find_by_id(&self, sprint_id: &SprintId) -> Option<&Sprint> {
        self.values.get(sprint_id)
    }

    pub fn contains_by_id(&self, sprint_id: &SprintId) -> bool {
        self.values.contains_key(sprint_id)
    }

    /// The single active sprint, if any.
    pub fn active(&self) -> Option<&Sprint> {
        self.values.values().find(|s| s.is_active())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_vec(&self) -> Vec<Sprint> {
        self.values.values().cloned().collect()
    }
}

impl TryFrom<Vec<Sprint>> for Sprints {
    type Error = DomainError;

    fn try_from(values: Vec<Sprint>) -> Result<Self, Self::Error> {
        Self::from_vec(values)
    }
}

impl From<Sprints> for Vec<Sprint> {
    fn from(sprints: Sprints) -> Self {
        sprints.to_vec()
    }
}
