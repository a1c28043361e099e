//! Project domain module (event-sourced).
//!
//! The `Project` aggregate owns two invariant-bearing collections (members,
//! sprints) and a multi-event state machine. Commands are pure: each returns
//! a new aggregate instance plus exactly one event, and replaying the event
//! history always reproduces the commanded state.

pub mod errors;
pub mod events;
pub mod ids;
pub mod member;
pub mod members;
pub mod project;
pub mod sprint;
pub mod sprints;
pub mod values;

pub use errors::ProjectError;
pub use events::{
    ProjectCreated, ProjectDeleted, ProjectEvent, ProjectMemberAdded, ProjectMemberRemoved,
    ProjectMemberRoleChanged, ProjectSprintAdded, ProjectSprintCompleted, ProjectSprintEdited,
    ProjectSprintStarted,
};
pub use ids::{MemberId, ProjectId, SprintId};
pub use member::{Member, MemberRole};
pub use members::Members;
pub use project::Project;
pub use sprint::{Sprint, SprintState};
pub use sprints::Sprints;
pub use values::{ProjectName, SprintGoal, SprintName};
