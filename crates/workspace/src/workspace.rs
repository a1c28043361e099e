use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sprintboard_core::{Aggregate, DomainError, DomainResult, ValueObject, uuid_identifier};
use sprintboard_events::{DomainEvent, EventId, EventSourced};

uuid_identifier!(
    /// Workspace identifier; displays as `Workspace-<uuid>`.
    WorkspaceId,
    prefix = "Workspace"
);

/// Workspace name.
///
/// Doubles as a subdomain label, so beyond the length bound it must be a
/// valid DNS name fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WorkspaceName(String);

impl WorkspaceName {
    pub const MAX_LENGTH: usize = 30;

    pub fn of(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::validation("WorkspaceName cannot be empty"));
        }
        if value.chars().count() > Self::MAX_LENGTH {
            return Err(DomainError::validation(format!(
                "WorkspaceName cannot be longer than {} characters",
                Self::MAX_LENGTH
            )));
        }
        if !is_valid_dns_fragment(&value) {
            return Err(DomainError::validation(format!(
                "WorkspaceName is not a valid domain fragment: {value}"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Dot-separated DNS labels: 1-63 ascii alphanumerics or hyphens each, no
/// leading/trailing hyphen.
fn is_valid_dns_fragment(value: &str) -> bool {
    value.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

impl ValueObject for WorkspaceName {}

impl TryFrom<String> for WorkspaceName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::of(value)
    }
}

impl From<WorkspaceName> for String {
    fn from(value: WorkspaceName) -> Self {
        value.0
    }
}

impl core::fmt::Display for WorkspaceName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Event: WorkspaceCreated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceCreated {
    pub id: EventId,
    pub aggregate_id: WorkspaceId,
    pub name: WorkspaceName,
    pub sequence_number: u64,
    pub occurred_at: DateTime<Utc>,
}

impl WorkspaceCreated {
    pub fn of(aggregate_id: WorkspaceId, name: WorkspaceName, sequence_number: u64) -> Self {
        Self {
            id: EventId::generate(),
            aggregate_id,
            name,
            sequence_number,
            occurred_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkspaceEvent {
    Created(WorkspaceCreated),
}

impl DomainEvent for WorkspaceEvent {
    type AggregateId = WorkspaceId;

    fn id(&self) -> EventId {
        match self {
            WorkspaceEvent::Created(e) => e.id,
        }
    }

    fn aggregate_id(&self) -> &WorkspaceId {
        match self {
            WorkspaceEvent::Created(e) => &e.aggregate_id,
        }
    }

    fn sequence_number(&self) -> u64 {
        match self {
            WorkspaceEvent::Created(e) => e.sequence_number,
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            WorkspaceEvent::Created(e) => e.occurred_at,
        }
    }

    fn event_type(&self) -> &'static str {
        match self {
            WorkspaceEvent::Created(_) => "workspace.created",
        }
    }

    fn is_created(&self) -> bool {
        matches!(self, WorkspaceEvent::Created(_))
    }
}

/// Aggregate root: Workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    id: WorkspaceId,
    name: WorkspaceName,
    sequence_number: u64,
    version: u64,
}

impl Workspace {
    /// Create a new workspace under a caller-supplied id.
    pub fn create(id: WorkspaceId, name: WorkspaceName) -> (Workspace, WorkspaceEvent) {
        let sequence_number = 1;
        let workspace = Workspace {
            id,
            name: name.clone(),
            sequence_number,
            version: 1,
        };
        let event = WorkspaceEvent::Created(WorkspaceCreated::of(id, name, sequence_number));
        (workspace, event)
    }

    pub fn name(&self) -> &WorkspaceName {
        &self.name
    }

    fn apply_event(self, event: &WorkspaceEvent) -> Workspace {
        match event {
            WorkspaceEvent::Created(e) => panic!(
                "corrupted journal: WorkspaceCreated mid-stream for {} (seq {})",
                e.aggregate_id, e.sequence_number
            ),
        }
    }
}

impl Aggregate for Workspace {
    type Id = WorkspaceId;

    fn id(&self) -> &WorkspaceId {
        &self.id
    }

    fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn with_version(self, version: u64) -> Self {
        Workspace { version, ..self }
    }
}

impl EventSourced for Workspace {
    type Event = WorkspaceEvent;

    fn replay(events: Vec<WorkspaceEvent>, snapshot: Workspace) -> Workspace {
        events
            .into_iter()
            .fold(snapshot, |workspace, event| workspace.apply_event(&event))
    }
}
