//! A time-boxed unit of work with a three-state lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sprintboard_core::{DomainError, DomainResult, Entity};

use crate::ids::SprintId;
use crate::values::{SprintGoal, SprintName};

/// Lifecycle state: `Future → Active → Done`, no other transition.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SprintState {
    Future,
    Active,
    Done,
}

#[derive(Serialize, Deserialize)]
struct SprintRecord {
    id: SprintId,
    name: SprintName,
    goal: SprintGoal,
    state: SprintState,
    start_date_time: DateTime<Utc>,
    end_date_time: DateTime<Utc>,
}

/// A sprint.
///
/// `start_date_time <= end_date_time` holds at every construction, including
/// the date copy-mutators and deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SprintRecord", into = "SprintRecord")]
pub struct Sprint {
    id: SprintId,
    name: SprintName,
    goal: SprintGoal,
    state: SprintState,
    start_date_time: DateTime<Utc>,
    end_date_time: DateTime<Utc>,
}

impl Sprint {
    /// Create a fresh sprint in the `Future` state.
    pub fn create(
        name: SprintName,
        goal: SprintGoal,
        start_date_time: DateTime<Utc>,
        end_date_time: DateTime<Utc>,
    ) -> DomainResult<Sprint> {
        Self::of(
            SprintId::generate(),
            name,
            goal,
            SprintState::Future,
            start_date_time,
            end_date_time,
        )
    }

    pub fn of(
        id: SprintId,
        name: SprintName,
        goal: SprintGoal,
        state: SprintState,
        start_date_time: DateTime<Utc>,
        end_date_time: DateTime<Utc>,
    ) -> DomainResult<Sprint> {
        if start_date_time > end_date_time {
            return Err(DomainError::validation(
                "Sprint start date must be on or before its end date",
            ));
        }
        Ok(Sprint {
            id,
            name,
            goal,
            state,
            start_date_time,
            end_date_time,
        })
    }

    pub fn name(&self) -> &SprintName {
        &self.name
    }

    pub fn goal(&self) -> &SprintGoal {
        &self.goal
    }

    pub fn state(&self) -> SprintState {
        self.state
    }

    pub fn start_date_time(&self) -> DateTime<Utc> {
        self.start_date_time
    }

    pub fn end_date_time(&self) -> DateTime<Utc> {
        self.end_date_time
    }

    pub fn is_future(&self) -> bool {
        self.state == SprintState::Future
    }

    pub fn is_active(&self) -> bool {
        self.state == SprintState::Active
    }

    pub fn is_done(&self) -> bool {
        self.state == SprintState::Done
    }

    pub fn with_name(&self, name: SprintName) -> Sprint {
        Sprint {
            name,
            ..self.clone()
        }
    }

    pub fn with_goal(&self, goal: SprintGoal) -> Sprint {
        Sprint {
            goal,
            ..self.clone()
        }
    }

    pub fn with_start_date_time(&self, start_date_time: DateTime<Utc>) -> DomainResult<Sprint> {
        Self::of(
            self.id,
            self.name.clone(),
            self.goal.clone(),
            self.state,
            start_date_time,
            self.end_date_time,
        )
    }

    pub fn with_end_date_time(&self, end_date_time: DateTime<Utc>) -> DomainResult<Sprint> {
        Self::of(
            self.id,
            self.name.clone(),
            self.goal.clone(),
            self.state,
            self.start_date_time,
            end_date_time,
        )
    }

    /// Transition guard: only a `Future` sprint can start.
    pub fn with_active(&self) -> DomainResult<Sprint> {
        match self.state {
            SprintState::Future => Ok(Sprint {
                state: SprintState::Active,
                ..self.clone()
            }),
            SprintState::Active => Err(DomainError::invariant(
                "cannot start an already active sprint",
            )),
            SprintState::Done => Err(DomainError::invariant("cannot start a done sprint")),
        }
    }

    /// Transition guard: only an `Active` sprint can complete.
    pub fn with_done(&self) -> DomainResult<Sprint> {
        match self.state {
            SprintState::Active => Ok(Sprint {
                state: SprintState::Done,
                ..self.clone()
            }),
            SprintState::Future => Err(DomainError::invariant(
                "cannot complete a sprint that has not started",
            )),
            SprintState::Done => Err(DomainError::invariant(
                "cannot complete an already done sprint",
            )),
        }
    }
}

impl Entity for Sprint {
    type Id = SprintId;

    fn id(&self) -> &SprintId {
        &self.id
    }
}

impl TryFrom<SprintRecord> for Sprint {
    type Error = DomainError;

    fn try_from(record: SprintRecord) -> Result<Self, Self::Error> {
        Self::of(
            record.id,
            record.name,
            record.goal,
            record.state,
            record.start_date_time,
            record.end_date_time,
        )
    }
}

impl From<Sprint> for SprintRecord {
    fn from(sprint: Sprint) -> Self {
        SprintRecord {
            id: sprint.id,
            name: sprint.name,
            goal: sprint.goal,
            state: sprint.state,
            start_date_time: sprint.start_date_time,
            end_date_time: sprint.end_date_time,
        }
    }
}
