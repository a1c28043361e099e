//! Domain event contracts.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use sprintboard_core::{Aggregate, uuid_identifier};

uuid_identifier!(
    /// Identity of a single event record, distinct from the aggregate id.
    EventId
);

/// An immutable, typed record of one aggregate state transition.
///
/// Events are facts: append-only, never mutated after creation. Constructors
/// generate a fresh [`EventId`] and timestamp, but the sequence number is
/// always supplied by the aggregate that emitted the event.
pub trait DomainEvent: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Identifier type of the aggregate this event belongs to.
    type AggregateId: Clone
        + Eq
        + core::hash::Hash
        + core::fmt::Debug
        + core::fmt::Display;

    /// Event identity.
    fn id(&self) -> EventId;

    /// Aggregate this event belongs to.
    fn aggregate_id(&self) -> &Self::AggregateId;

    /// Position in the aggregate's stream (1-based, gap-free).
    fn sequence_number(&self) -> u64;

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Stable event name (e.g. `"project.sprint.started"`).
    fn event_type(&self) -> &'static str;

    /// Whether this is the very first event of a stream.
    fn is_created(&self) -> bool;
}

/// An aggregate whose state is reconstructable from a snapshot plus its
/// trailing events.
///
/// The serde bounds make snapshots and events symmetric: whatever the store
/// persists must deserialize back to an equal value.
pub trait EventSourced:
    Aggregate + Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type Event: DomainEvent<AggregateId = Self::Id> + Serialize + DeserializeOwned;

    /// Fold `events` onto `snapshot` in ascending sequence order.
    ///
    /// The events must be the uninterrupted tail strictly after the
    /// snapshot's sequence number. A stream that violates that (a mid-stream
    /// creation event, a gap, an application failure) is corrupted history
    /// and panics rather than producing a silently wrong aggregate.
    fn replay(events: Vec<Self::Event>, snapshot: Self) -> Self;
}
