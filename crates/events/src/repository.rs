//! Event-sourced repository: store with snapshot decisions, find with replay.

use thiserror::Error;

use sprintboard_core::Aggregate;

use crate::event::{DomainEvent, EventSourced};
use crate::store::{EventOf, EventStore, EventStoreError, IdOf};

/// Pluggable predicate deciding whether to persist a snapshot alongside an
/// event. Purely a read-cost optimization; correctness never depends on it.
pub type SnapshotDecider<A> = Box<dyn Fn(&EventOf<A>, &A) -> bool + Send + Sync>;

/// Repository operation error.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The aggregate was stored concurrently at a newer version. The caller
    /// must refetch via `find_by_id` and retry its command from the fresh
    /// state; the repository never auto-retries.
    #[error("conflict while storing event: {0}")]
    Conflict(#[source] EventStoreError),

    #[error("event store failure: {0}")]
    Store(#[source] EventStoreError),
}

/// Generic repository over an [`EventStore`].
///
/// `store` persists exactly one new event per command result; `find_by_id`
/// reconstructs current state from the latest snapshot plus trailing events
/// using the aggregate's own replay. `Account`, `Project` and `Workspace`
/// all go through this one implementation.
pub struct Repository<ES>
where
    ES: EventStore,
{
    event_store: ES,
    snapshot_decider: Option<SnapshotDecider<ES::Aggregate>>,
}

impl<ES> Repository<ES>
where
    ES: EventStore,
{
    pub fn new(event_store: ES) -> Self {
        Self {
            event_store,
            snapshot_decider: None,
        }
    }

    pub fn with_snapshot_decider(mut self, decider: SnapshotDecider<ES::Aggregate>) -> Self {
        self.snapshot_decider = Some(decider);
        self
    }

    /// Persist a snapshot on every `number_of_events`-th event.
    pub fn with_retention(self, number_of_events: u64) -> Self {
        self.with_snapshot_decider(Box::new(move |event, _| {
            event.sequence_number() % number_of_events == 0
        }))
    }

    /// Persist `event`; additionally persist `snapshot` when the event is
    /// the stream's first or the snapshot decider accepts.
    ///
    /// The event-only path is guarded by the snapshot's current version as
    /// the expected version.
    pub fn store(
        &self,
        event: &EventOf<ES::Aggregate>,
        snapshot: &ES::Aggregate,
    ) -> Result<(), RepositoryError> {
        let with_snapshot = event.is_created()
            || self
                .snapshot_decider
                .as_ref()
                .is_some_and(|decide| decide(event, snapshot));

        tracing::debug!(
            aggregate_id = %event.aggregate_id(),
            event_type = event.event_type(),
            sequence_number = event.sequence_number(),
            with_snapshot,
            "storing event"
        );

        let result = if with_snapshot {
            self.event_store.persist_event_and_snapshot(event, snapshot)
        } else {
            self.event_store.persist_event(event, snapshot.version())
        };

        result.map_err(|e| match e {
            EventStoreError::OptimisticLock { .. } => {
                tracing::warn!(
                    aggregate_id = %event.aggregate_id(),
                    "optimistic lock conflict; caller must refetch and retry"
                );
                RepositoryError::Conflict(e)
            }
            other => RepositoryError::Store(other),
        })
    }

    /// Load the latest snapshot and fold the trailing events onto it.
    ///
    /// Returns `None` when no snapshot exists (the aggregate was never
    /// created, or its creation was never stored).
    pub fn find_by_id(
        &self,
        id: &IdOf<ES::Aggregate>,
    ) -> Result<Option<ES::Aggregate>, RepositoryError> {
        let Some(snapshot) = self
            .event_store
            .get_latest_snapshot_by_id(id)
            .map_err(RepositoryError::Store)?
        else {
            return Ok(None);
        };

        let events = self
            .event_store
            .get_events_by_id_since_sequence_number(id, snapshot.sequence_number() + 1)
            .map_err(RepositoryError::Store)?;

        tracing::debug!(
            aggregate_id = %id,
            snapshot_sequence_number = snapshot.sequence_number(),
            trailing_events = events.len(),
            "rehydrating aggregate"
        );

        Ok(Some(<ES::Aggregate as EventSourced>::replay(events, snapshot)))
    }
}
