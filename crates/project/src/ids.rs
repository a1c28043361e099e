//! Identifiers owned by the project domain.

use sprintboard_core::uuid_identifier;

uuid_identifier!(
    /// Project identifier; displays as `Project-<uuid>`.
    ProjectId,
    prefix = "Project"
);

uuid_identifier!(
    /// Identity of a membership record (distinct from the account it
    /// represents).
    MemberId
);

uuid_identifier!(
    /// Sprint identifier.
    SprintId
);
