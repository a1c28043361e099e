//! Typed command failures of the project aggregate.

use thiserror::Error;

use sprintboard_account::AccountId;
use sprintboard_core::DomainError;

use crate::ids::{ProjectId, SprintId};

/// Domain rule violations returned by project commands.
///
/// Callers branch on these; they are results, not exceptional control flow.
/// Each variant carries the detail needed to act on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectError {
    #[error("the project has already been deleted")]
    AlreadyDeleted { project_id: ProjectId },

    #[error("the sprint was not found in the project")]
    SprintNotFound {
        project_id: ProjectId,
        sprint_id: SprintId,
    },

    #[error("the member was not found in the project")]
    MemberNotFound {
        project_id: ProjectId,
        account_id: AccountId,
    },

    /// Collection or transition invariant surfaced from `Members`/`Sprints`
    /// (second lead, duplicate sprint, illegal state transition, ...).
    #[error(transparent)]
    Domain(#[from] DomainError),
}
