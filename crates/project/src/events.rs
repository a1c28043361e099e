//! Event taxonomy of the project aggregate.
//!
//! One variant per aggregate operation. Constructors generate a fresh event
//! identity and timestamp; the sequence number is always supplied by the
//! aggregate, never made up here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sprintboard_account::AccountId;
use sprintboard_events::{DomainEvent, EventId};

use crate::ids::{ProjectId, SprintId};
use crate::member::{Member, MemberRole};
use crate::members::Members;
use crate::sprint::Sprint;
use crate::values::ProjectName;

/// Event: ProjectCreated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectCreated {
    pub id: EventId,
    pub aggregate_id: ProjectId,
    pub name: ProjectName,
    pub members: Members,
    pub sequence_number: u64,
    pub occurred_at: DateTime<Utc>,
}

impl ProjectCreated {
    pub fn of(
        aggregate_id: ProjectId,
        name: ProjectName,
        members: Members,
        sequence_number: u64,
    ) -> Self {
        Self {
            id: EventId::generate(),
            aggregate_id,
            name,
            members,
            sequence_number,
            occurred_at: Utc::now(),
        }
    }
}

/// Event: ProjectDeleted (terminal).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDeleted {
    pub id: EventId,
    pub aggregate_id: ProjectId,
    pub sequence_number: u64,
    pub occurred_at: DateTime<Utc>,
}

impl ProjectDeleted {
    pub fn of(aggregate_id: ProjectId, sequence_number: u64) -> Self {
        Self {
            id: EventId::generate(),
            aggregate_id,
            sequence_number,
            occurred_at: Utc::now(),
        }
    }
}

/// Event: ProjectSprintAdded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSprintAdded {
    pub id: EventId,
    pub aggregate_id: ProjectId,
    pub sprint: Sprint,
    pub sequence_number: u64,
    pub occurred_at: DateTime<Utc>,
}

impl ProjectSprintAdded {
    pub fn of(aggregate_id: ProjectId, sprint: Sprint, sequence_number: u64) -> Self {
        Self {
            id: EventId::generate(),
            aggregate_id,
            sprint,
            sequence_number,
            occurred_at: Utc::now(),
        }
    }
}

/// Event: ProjectSprintEdited (the sprint is replaced wholesale).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSprintEdited {
    pub id: EventId,
    pub aggregate_id: ProjectId,
    pub sprint: Sprint,
    pub sequence_number: u64,
    pub occurred_at: DateTime<Utc>,
}

impl ProjectSprintEdited {
    pub fn of(aggregate_id: ProjectId, sprint: Sprint, sequence_number: u64) -> Self {
        Self {
            id: EventId::generate(),
            aggregate_id,
            sprint,
            sequence_number,
            occurred_at: Utc::now(),
        }
    }
}

/// Event: ProjectSprintStarted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSprintStarted {
    pub id: EventId,
    pub aggregate_id: ProjectId,
    pub sprint_id: SprintId,
    pub sequence_number: u64,
    pub occurred_at: DateTime<Utc>,
}

impl ProjectSprintStarted {
    pub fn of(aggregate_id: ProjectId, sprint_id: SprintId, sequence_number: u64) -> Self {
        Self {
            id: EventId::generate(),
            aggregate_id,
            sprint_id,
            sequence_number,
            occurred_at: Utc::now(),
        }
    }
}

/// Event: ProjectSprintCompleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSprintCompleted {
    pub id: EventId,
    pub aggregate_id: ProjectId,
    pub sprint_id: SprintId,
    pub sequence_number: u64,
    pub occurred_at: DateTime<Utc>,
}

impl ProjectSprintCompleted {
    pub fn of(aggregate_id: ProjectId, sprint_id: SprintId, sequence_number: u64) -> Self {
        Self {
            id: EventId::generate(),
            aggregate_id,
            sprint_id,
            sequence_number,
            occurred_at: Utc::now(),
        }
    }
}

/// Event: ProjectMemberAdded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMemberAdded {
    pub id: EventId,
    pub aggregate_id: ProjectId,
    pub member: Member,
    pub sequence_number: u64,
    pub occurred_at: DateTime<Utc>,
}

impl ProjectMemberAdded {
    pub fn of(aggregate_id: ProjectId, member: Member, sequence_number: u64) -> Self {
        Self {
            id: EventId::generate(),
            aggregate_id,
            member,
            sequence_number,
            occurred_at: Utc::now(),
        }
    }
}

/// Event: ProjectMemberRemoved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMemberRemoved {
    pub id: EventId,
    pub aggregate_id: ProjectId,
    pub account_id: AccountId,
    pub sequence_number: u64,
    pub occurred_at: DateTime<Utc>,
}

impl ProjectMemberRemoved {
    pub fn of(aggregate_id: ProjectId, account_id: AccountId, sequence_number: u64) -> Self {
        Self {
            id: EventId::generate(),
            aggregate_id,
            account_id,
            sequence_number,
            occurred_at: Utc::now(),
        }
    }
}

/// Event: ProjectMemberRoleChanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMemberRoleChanged {
    pub id: EventId,
    pub aggregate_id: ProjectId,
    pub account_id: AccountId,
    pub role: MemberRole,
    pub sequence_number: u64,
    pub occurred_at: DateTime<Utc>,
}

impl ProjectMemberRoleChanged {
    pub fn of(
        aggregate_id: ProjectId,
        account_id: AccountId,
        role: MemberRole,
        sequence_number: u64,
    ) -> Self {
        Self {
            id: EventId::generate(),
            aggregate_id,
            account_id,
            role,
            sequence_number,
            occurred_at: Utc::now(),
        }
    }
}

/// The closed set of project events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProjectEvent {
    Created(ProjectCreated),
    Deleted(ProjectDeleted),
    SprintAdded(ProjectSprintAdded),
    SprintEdited(ProjectSprintEdited),
    SprintStarted(ProjectSprintStarted),
    SprintCompleted(ProjectSprintCompleted),
    MemberAdded(ProjectMemberAdded),
    MemberRemoved(ProjectMemberRemoved),
    MemberRoleChanged(ProjectMemberRoleChanged),
}

impl DomainEvent for ProjectEvent {
    type AggregateId = ProjectId;

    fn id(&self) -> EventId {
        match self {
            ProjectEvent::Created(e) => e.id,
            ProjectEvent::Deleted(e) => e.id,
            ProjectEvent::SprintAdded(e) => e.id,
            ProjectEvent::SprintEdited(e) => e.id,
            ProjectEvent::SprintStarted(e) => e.id,
            ProjectEvent::SprintCompleted(e) => e.id,
            ProjectEvent::MemberAdded(e) => e.id,
            ProjectEvent::MemberRemoved(e) => e.id,
            ProjectEvent::MemberRoleChanged(e) => e.id,
        }
    }

    fn aggregate_id(&self) -> &ProjectId {
        match self {
            ProjectEvent::Created(e) => &e.aggregate_id,
            ProjectEvent::Deleted(e) => &e.aggregate_id,
            ProjectEvent::SprintAdded(e) => &e.aggregate_id,
            ProjectEvent::SprintEdited(e) => &e.aggregate_id,
            ProjectEvent::SprintStarted(e) => &e.aggregate_id,
            ProjectEvent::SprintCompleted(e) => &e.aggregate_id,
            ProjectEvent::MemberAdded(e) => &e.aggregate_id,
            ProjectEvent::MemberRemoved(e) => &e.aggregate_id,
            ProjectEvent::MemberRoleChanged(e) => &e.aggregate_id,
        }
    }

    fn sequence_number(&self) -> u64 {
        match self {
            ProjectEvent::Created(e) => e.sequence_number,
            ProjectEvent::Deleted(e) => e.sequence_number,
            ProjectEvent::SprintAdded(e) => e.sequence_number,
            ProjectEvent::SprintEdited(e) => e.sequence_number,
            ProjectEvent::SprintStarted(e) => e.sequence_number,
            ProjectEvent::SprintCompleted(e) => e.sequence_number,
            ProjectEvent::MemberAdded(e) => e.sequence_number,
            ProjectEvent::MemberRemoved(e) => e.sequence_number,
            ProjectEvent::MemberRoleChanged(e) => e.sequence_number,
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ProjectEvent::Created(e) => e.occurred_at,
            ProjectEvent::Deleted(e) => e.occurred_at,
            ProjectEvent::SprintAdded(e) => e.occurred_at,
            ProjectEvent::SprintEdited(e) => e.occurred_at,
            ProjectEvent::SprintStarted(e) => e.occurred_at,
            ProjectEvent::SprintCompleted(e) => e.occurred_at,
            ProjectEvent::MemberAdded(e) => e.occurred_at,
            ProjectEvent::MemberRemoved(e) => e.occurred_at,
            ProjectEvent::MemberRoleChanged(e) => e.occurred_at,
        }
    }

    fn event_type(&self) -> &'static str {
        match self {
            ProjectEvent::Created(_) => "project.created",
            ProjectEvent::Deleted(_) => "project.deleted",
            ProjectEvent::SprintAdded(_) => "project.sprint.added",
            ProjectEvent::SprintEdited(_) => "project.sprint.edited",
            ProjectEvent::SprintStarted(_) => "project.sprint.started",
            ProjectEvent::SprintCompleted(_) => "project.sprint.completed",
            ProjectEvent::MemberAdded(_) => "project.member.added",
            ProjectEvent::MemberRemoved(_) => "project.member.removed",
            ProjectEvent::MemberRoleChanged(_) => "project.member.role_changed",
        }
    }

    fn is_created(&self) -> bool {
        matches!(self, ProjectEvent::Created(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::MemberId;
    use crate::values::{SprintGoal, SprintName};
    use chrono::TimeDelta;
    use sprintboard_core::Entity;

    fn test_sprint() -> Sprint {
        let start = Utc::now();
        Sprint::create(
            SprintName::of("Sprint 1").unwrap(),
            SprintGoal::of("goal").unwrap(),
            start,
            start + TimeDelta::days(14),
        )
        .unwrap()
    }

    #[test]
    fn only_the_creation_event_is_created() {
        let project_id = ProjectId::generate();
        let members = Members::of_single(AccountId::generate());
        let created = ProjectEvent::Created(ProjectCreated::of(
            project_id,
            ProjectName::of("Sprint Board").unwrap(),
            members,
            1,
        ));
        let deleted = ProjectEvent::Deleted(ProjectDeleted::of(project_id, 2));

        assert!(created.is_created());
        assert!(!deleted.is_created());
        assert_eq!(created.event_type(), "project.created");
        assert_eq!(created.sequence_number(), 1);
        assert_eq!(created.aggregate_id(), &project_id);
    }

    #[test]
    fn every_variant_serializes_symmetrically() {
        let project_id = ProjectId::generate();
        let account_id = AccountId::generate();
        let sprint = test_sprint();
        let member = Member::of(MemberId::generate(), account_id, MemberRole::Normal);

        let events = vec![
            ProjectEvent::Created(ProjectCreated::of(
                project_id,
                ProjectName::of("Sprint Board").unwrap(),
                Members::of_single(account_id),
                1,
            )),
            ProjectEvent::SprintAdded(ProjectSprintAdded::of(project_id, sprint.clone(), 2)),
            ProjectEvent::SprintEdited(ProjectSprintEdited::of(project_id, sprint.clone(), 3)),
            ProjectEvent::SprintStarted(ProjectSprintStarted::of(project_id, *sprint.id(), 4)),
            ProjectEvent::SprintCompleted(ProjectSprintCompleted::of(project_id, *sprint.id(), 5)),
            ProjectEvent::MemberAdded(ProjectMemberAdded::of(project_id, member, 6)),
            ProjectEvent::MemberRoleChanged(ProjectMemberRoleChanged::of(
                project_id,
                account_id,
                MemberRole::Admin,
                7,
            )),
            ProjectEvent::MemberRemoved(ProjectMemberRemoved::of(project_id, account_id, 8)),
            ProjectEvent::Deleted(ProjectDeleted::of(project_id, 9)),
        ];

        for event in events {
            let json = serde_json::to_string(&event).unwrap();
            let back: ProjectEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(back, event, "round trip failed for {}", event.event_type());
        }
    }
}
