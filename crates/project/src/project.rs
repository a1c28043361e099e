//! Aggregate root: Project.

use serde::{Deserialize, Serialize};

use sprintboard_account::AccountId;
use sprintboard_core::{Aggregate, Entity};
use sprintboard_events::{DomainEvent, EventSourced};

use crate::errors::ProjectError;
use crate::events::{
    ProjectCreated, ProjectDeleted, ProjectEvent, ProjectMemberAdded, ProjectMemberRemoved,
    ProjectMemberRoleChanged, ProjectSprintAdded, ProjectSprintCompleted, ProjectSprintEdited,
    ProjectSprintStarted,
};
use crate::ids::{ProjectId, SprintId};
use crate::member::{Member, MemberRole};
use crate::members::Members;
use crate::sprint::Sprint;
use crate::sprints::Sprints;
use crate::values::ProjectName;

/// The project state machine.
///
/// Commands are pure `&self` methods: each validates its preconditions,
/// returns a new instance with the sequence number advanced by exactly 1,
/// and exactly one event stamped with the new sequence number. Nothing here
/// touches a repository, and `version` is never moved by domain logic.
///
/// Deletion is a soft, terminal flag: once set, every command fails with
/// [`ProjectError::AlreadyDeleted`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: ProjectName,
    members: Members,
    sprints: Sprints,
    deleted: bool,
    sequence_number: u64,
    version: u64,
}

impl Project {
    /// Create a new project with `executor_id` as its lead.
    pub fn create(executor_id: AccountId, name: ProjectName) -> (Project, ProjectEvent) {
        let id = ProjectId::generate();
        let members = Members::of_single(executor_id);
        let sequence_number = 1;
        let project = Project {
            id,
            name: name.clone(),
            members: members.clone(),
            sprints: Sprints::of_empty(),
            deleted: false,
            sequence_number,
            version: 1,
        };
        let event = ProjectEvent::Created(ProjectCreated::of(id, name, members, sequence_number));
        (project, event)
    }

    pub fn name(&self) -> &ProjectName {
        &self.name
    }

    pub fn members(&self) -> &Members {
        &self.members
    }

    pub fn sprints(&self) -> &Sprints {
        &self.sprints
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn ensure_not_deleted(&self) -> Result<(), ProjectError> {
        if self.deleted {
            return Err(ProjectError::AlreadyDeleted {
                project_id: self.id,
            });
        }
        Ok(())
    }

    /// Soft-delete the project (terminal).
    pub fn delete(&self) -> Result<(Project, ProjectEvent), ProjectError> {
        self.ensure_not_deleted()?;
        let sequence_number = self.sequence_number + 1;
        let project = Project {
            deleted: true,
            sequence_number,
            ..self.clone()
        };
        let event = ProjectEvent::Deleted(ProjectDeleted::of(self.id, sequence_number));
        Ok((project, event))
    }

    pub fn add_sprint(&self, sprint: Sprint) -> Result<(Project, ProjectEvent), ProjectError> {
        self.ensure_not_deleted()?;
        let sprints = self.sprints.add(sprint.clone())?;
        let sequence_number = self.sequence_number + 1;
        let project = Project {
            sprints,
            sequence_number,
            ..self.clone()
        };
        let event =
            ProjectEvent::SprintAdded(ProjectSprintAdded::of(self.id, sprint, sequence_number));
        Ok((project, event))
    }

    /// Replace an existing sprint wholesale.
    pub fn edit_sprint(&self, sprint: Sprint) -> Result<(Project, ProjectEvent), ProjectError> {
        self.ensure_not_deleted()?;
        if !self.sprints.contains_by_id(sprint.id()) {
            return Err(ProjectError::SprintNotFound {
                project_id: self.id,
                sprint_id: *sprint.id(),
            });
        }
        let (sprints, sprint) = self.sprints.edit(sprint)?;
        let sequence_number = self.sequence_number + 1;
        let project = Project {
            sprints,
            sequence_number,
            ..self.clone()
        };
        let event =
            ProjectEvent::SprintEdited(ProjectSprintEdited::of(self.id, sprint, sequence_number));
        Ok((project, event))
    }

    pub fn start_sprint(&self, sprint_id: SprintId) -> Result<(Project, ProjectEvent), ProjectError> {
        self.ensure_not_deleted()?;
        if !self.sprints.contains_by_id(&sprint_id) {
            return Err(ProjectError::SprintNotFound {
                project_id: self.id,
                sprint_id,
            });
        }
        let (sprints, _) = self.sprints.start(&sprint_id)?;
        let sequence_number = self.sequence_number + 1;
        let project = Project {
            sprints,
            sequence_number,
            ..self.clone()
        };
        let event = ProjectEvent::SprintStarted(ProjectSprintStarted::of(
            self.id,
            sprint_id,
            sequence_number,
        ));
        Ok((project, event))
    }

    pub fn complete_sprint(
        &self,
        sprint_id: SprintId,
    ) -> Result<(Project, ProjectEvent), ProjectError> {
        self.ensure_not_deleted()?;
        if !self.sprints.contains_by_id(&sprint_id) {
            return Err(ProjectError::SprintNotFound {
                project_id: self.id,
                sprint_id,
            });
        }
        let (sprints, _) = self.sprints.done(&sprint_id)?;
        let sequence_number = self.sequence_number + 1;
        let project = Project {
            sprints,
            sequence_number,
            ..self.clone()
        };
        let event = ProjectEvent::SprintCompleted(ProjectSprintCompleted::of(
            self.id,
            sprint_id,
            sequence_number,
        ));
        Ok((project, event))
    }

    pub fn add_member(&self, member: Member) -> Result<(Project, ProjectEvent), ProjectError> {
        self.ensure_not_deleted()?;
        let members = self.members.add_member(member.clone())?;
        let sequence_number = self.sequence_number + 1;
        let project = Project {
            members,
            sequence_number,
            ..self.clone()
        };
        let event =
            ProjectEvent::MemberAdded(ProjectMemberAdded::of(self.id, member, sequence_number));
        Ok((project, event))
    }

    pub fn remove_member(
        &self,
        account_id: AccountId,
    ) -> Result<(Project, ProjectEvent), ProjectError> {
        self.ensure_not_deleted()?;
        if !self.members.contains_by_account_id(&account_id) {
            return Err(ProjectError::MemberNotFound {
                project_id: self.id,
                account_id,
            });
        }
        let (members, _) = self.members.remove_member_by_account_id(&account_id)?;
        let sequence_number = self.sequence_number + 1;
        let project = Project {
            members,
            sequence_number,
            ..self.clone()
        };
        let event = ProjectEvent::MemberRemoved(ProjectMemberRemoved::of(
            self.id,
            account_id,
            sequence_number,
        ));
        Ok((project, event))
    }

    pub fn change_member_role(
        &self,
        account_id: AccountId,
        role: MemberRole,
    ) -> Result<(Project, ProjectEvent), ProjectError> {
        self.ensure_not_deleted()?;
        if !self.members.contains_by_account_id(&account_id) {
            return Err(ProjectError::MemberNotFound {
                project_id: self.id,
                account_id,
            });
        }
        let (members, _) = self.members.change_role(&account_id, role)?;
        let sequence_number = self.sequence_number + 1;
        let project = Project {
            members,
            sequence_number,
            ..self.clone()
        };
        let event = ProjectEvent::MemberRoleChanged(ProjectMemberRoleChanged::of(
            self.id,
            account_id,
            role,
            sequence_number,
        ));
        Ok((project, event))
    }

    /// Apply one replayed event by dispatching to the command that produced
    /// it. Any failure here means the journal does not describe a state this
    /// aggregate could ever have reached — that is corruption, not a domain
    /// error, and it panics.
    fn apply_event(&self, event: &ProjectEvent) -> Project {
        let expected = self.sequence_number + 1;
        if event.sequence_number() != expected {
            panic!(
                "corrupted journal for {}: expected sequence {expected}, got {} ({})",
                self.id,
                event.sequence_number(),
                event.event_type()
            );
        }

        let applied = match event {
            ProjectEvent::Created(e) => panic!(
                "corrupted journal for {}: creation event mid-stream (seq {})",
                self.id, e.sequence_number
            ),
            ProjectEvent::Deleted(_) => self.delete(),
            ProjectEvent::SprintAdded(e) => self.add_sprint(e.sprint.clone()),
            ProjectEvent::SprintEdited(e) => self.edit_sprint(e.sprint.clone()),
            ProjectEvent::SprintStarted(e) => self.start_sprint(e.sprint_id),
            ProjectEvent::SprintCompleted(e) => self.complete_sprint(e.sprint_id),
            ProjectEvent::MemberAdded(e) => self.add_member(e.member.clone()),
            ProjectEvent::MemberRemoved(e) => self.remove_member(e.account_id),
            ProjectEvent::MemberRoleChanged(e) => self.change_member_role(e.account_id, e.role),
        };

        match applied {
            Ok((project, _)) => project,
            Err(e) => panic!(
                "corrupted journal for {}: {} failed during replay: {e}",
                self.id,
                event.event_type()
            ),
        }
    }
}

impl Aggregate for Project {
    type Id = ProjectId;

    fn id(&self) -> &ProjectId {
        &self.id
    }

    fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn with_version(self, version: u64) -> Self {
        Project { version, ..self }
    }
}

impl EventSourced for Project {
    type Event = ProjectEvent;

    fn replay(events: Vec<ProjectEvent>, snapshot: Project) -> Project {
        events
            .into_iter()
            .fold(snapshot, |project, event| project.apply_event(&event))
    }
}
