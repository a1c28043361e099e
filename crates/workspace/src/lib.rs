//! Workspace domain module (event-sourced).

pub mod workspace;

pub use workspace::{Workspace, WorkspaceCreated, WorkspaceEvent, WorkspaceId, WorkspaceName};
