//! Append-only event store contract.

use thiserror::Error;

use sprintboard_core::Aggregate;

use crate::event::EventSourced;

/// Event type of an event-sourced aggregate.
pub type EventOf<A> = <A as EventSourced>::Event;

/// Identifier type of an aggregate.
pub type IdOf<A> = <A as Aggregate>::Id;

/// Event store operation error.
///
/// These are **infrastructure** failures (storage, concurrency,
/// serialization) as opposed to domain rule violations.
#[derive(Debug, Error)]
pub enum EventStoreError {
    /// The expected-version check failed; the caller holds a stale
    /// aggregate and must refetch before retrying.
    #[error("optimistic lock failed: expected version {expected}, found {actual}")]
    OptimisticLock { expected: u64, actual: u64 },

    /// No stream exists for the aggregate (its creation event was never
    /// persisted).
    #[error("no stream for aggregate {0}")]
    StreamNotFound(String),

    /// A creation event was persisted twice for the same aggregate.
    #[error("stream already exists for aggregate {0}")]
    StreamAlreadyExists(String),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend-specific failure (I/O, storage, lock poisoning).
    #[error("store failure: {0}")]
    Store(String),
}

/// Persistence collaborator for one aggregate type.
///
/// One stream per aggregate instance, keyed by the aggregate id. Within a
/// stream, events carry the aggregate-assigned sequence numbers; the store
/// additionally manages the persistence `version` used for optimistic
/// concurrency, advancing it by 1 per successful persist.
///
/// Implementations may block on network/storage latency and must:
/// - enforce the expected-version check on `persist_event`
/// - persist event + snapshot atomically in `persist_event_and_snapshot`
/// - return events in ascending sequence order
pub trait EventStore: Send + Sync {
    type Aggregate: EventSourced;

    /// Append one event, guarded by the stream's current version.
    fn persist_event(
        &self,
        event: &EventOf<Self::Aggregate>,
        expected_version: u64,
    ) -> Result<(), EventStoreError>;

    /// Append one event and replace the stream's snapshot, atomically.
    ///
    /// When the event `is_created`, this brings the stream into existence
    /// at version 1.
    fn persist_event_and_snapshot(
        &self,
        event: &EventOf<Self::Aggregate>,
        snapshot: &Self::Aggregate,
    ) -> Result<(), EventStoreError>;

    /// Latest snapshot, stamped with the stream's current version.
    fn get_latest_snapshot_by_id(
        &self,
        id: &IdOf<Self::Aggregate>,
    ) -> Result<Option<Self::Aggregate>, EventStoreError>;

    /// Events with sequence number `>= from_sequence_number`, ascending.
    fn get_events_by_id_since_sequence_number(
        &self,
        id: &IdOf<Self::Aggregate>,
        from_sequence_number: u64,
    ) -> Result<Vec<EventOf<Self::Aggregate>>, EventStoreError>;
}

impl<S> EventStore for std::sync::Arc<S>
where
    S: EventStore + ?Sized,
{
    type Aggregate = S::Aggregate;

    fn persist_event(
        &self,
        event: &EventOf<Self::Aggregate>,
        expected_version: u64,
    ) -> Result<(), EventStoreError> {
        (**self).persist_event(event, expected_version)
    }

    fn persist_event_and_snapshot(
        &self,
        event: &EventOf<Self::Aggregate>,
        snapshot: &Self::Aggregate,
    ) -> Result<(), EventStoreError> {
        (**self).persist_event_and_snapshot(event, snapshot)
    }

    fn get_latest_snapshot_by_id(
        &self,
        id: &IdOf<Self::Aggregate>,
    ) -> Result<Option<Self::Aggregate>, EventStoreError> {
        (**self).get_latest_snapshot_by_id(id)
    }

    fn get_events_by_id_since_sequence_number(
        &self,
        id: &IdOf<Self::Aggregate>,
        from_sequence_number: u64,
    ) -> Result<Vec<EventOf<Self::Aggregate>>, EventStoreError> {
        (**self).get_events_by_id_since_sequence_number(id, from_sequence_number)
    }
}
