use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value as JsonValue;

use sprintboard_core::Aggregate;
use sprintboard_events::{DomainEvent, EventOf, EventSourced, EventStore, EventStoreError, IdOf};

#[derive(Debug)]
struct JournalRow {
    sequence_number: u64,
    payload: JsonValue,
}

#[derive(Debug)]
struct Stream {
    journal: Vec<JournalRow>,
    snapshot: JsonValue,
    /// Store-managed concurrency token: +1 per successful persist.
    version: u64,
}

/// In-memory journal + snapshot store, one stream per aggregate instance.
///
/// Intended for tests/dev. Payloads round-trip through `serde_json` on both
/// write and read, the same shape a document-store backend persists, so the
/// symmetric-serialization contract is exercised rather than bypassed.
#[derive(Debug)]
pub struct InMemoryEventStore<A: EventSourced> {
    streams: RwLock<HashMap<A::Id, Stream>>,
}

impl<A: EventSourced> InMemoryEventStore<A> {
    pub fn new() -> Self {
        Self {
            streams: RwLock::new(HashMap::new()),
        }
    }
}

impl<A: EventSourced> Default for InMemoryEventStore<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: EventSourced> EventStore for InMemoryEventStore<A> {
    type Aggregate = A;

    fn persist_event(&self, event: &EventOf<A>, expected_version: u64) -> Result<(), EventStoreError> {
        let payload = serde_json::to_value(event)?;

        let mut streams = self
            .streams
            .write()
            .map_err(|_| EventStoreError::Store("lock poisoned".to_string()))?;

        let stream = streams
            .get_mut(event.aggregate_id())
            .ok_or_else(|| EventStoreError::StreamNotFound(event.aggregate_id().to_string()))?;

        if stream.version != expected_version {
            tracing::warn!(
                aggregate_id = %event.aggregate_id(),
                expected = expected_version,
                actual = stream.version,
                "rejecting stale append"
            );
            return Err(EventStoreError::OptimisticLock {
                expected: expected_version,
                actual: stream.version,
            });
        }

        stream.journal.push(JournalRow {
            sequence_number: event.sequence_number(),
            payload,
        });
        stream.version += 1;

        tracing::debug!(
            aggregate_id = %event.aggregate_id(),
            sequence_number = event.sequence_number(),
            version = stream.version,
            "event appended"
        );
        Ok(())
    }

    fn persist_event_and_snapshot(
        &self,
        event: &EventOf<A>,
        snapshot: &A,
    ) -> Result<(), EventStoreError> {
        let event_payload = serde_json::to_value(event)?;
        let snapshot_payload = serde_json::to_value(snapshot)?;

        let mut streams = self
            .streams
            .write()
            .map_err(|_| EventStoreError::Store("lock poisoned".to_string()))?;

        if event.is_created() {
            if streams.contains_key(event.aggregate_id()) {
                return Err(EventStoreError::StreamAlreadyExists(
                    event.aggregate_id().to_string(),
                ));
            }
            streams.insert(
                event.aggregate_id().clone(),
                Stream {
                    journal: vec![JournalRow {
                        sequence_number: event.sequence_number(),
                        payload: event_payload,
                    }],
                    snapshot: snapshot_payload,
                    version: 1,
                },
            );
            tracing::debug!(aggregate_id = %event.aggregate_id(), "stream created");
            return Ok(());
        }

        let stream = streams
            .get_mut(event.aggregate_id())
            .ok_or_else(|| EventStoreError::StreamNotFound(event.aggregate_id().to_string()))?;

        if stream.version != snapshot.version() {
            tracing::warn!(
                aggregate_id = %event.aggregate_id(),
                expected = snapshot.version(),
                actual = stream.version,
                "rejecting stale snapshot append"
            );
            return Err(EventStoreError::OptimisticLock {
                expected: snapshot.version(),
                actual: stream.version,
            });
        }

        stream.journal.push(JournalRow {
            sequence_number: event.sequence_number(),
            payload: event_payload,
        });
        stream.snapshot = snapshot_payload;
        stream.version += 1;

        tracing::debug!(
            aggregate_id = %event.aggregate_id(),
            sequence_number = event.sequence_number(),
            version = stream.version,
            "event and snapshot persisted"
        );
        Ok(())
    }

    fn get_latest_snapshot_by_id(&self, id: &IdOf<A>) -> Result<Option<A>, EventStoreError> {
        let streams = self
            .streams
            .read()
            .map_err(|_| EventStoreError::Store("lock poisoned".to_string()))?;

        let Some(stream) = streams.get(id) else {
            return Ok(None);
        };

        let aggregate: A = serde_json::from_value(stream.snapshot.clone())?;
        Ok(Some(aggregate.with_version(stream.version)))
    }

    fn get_events_by_id_since_sequence_number(
        &self,
        id: &IdOf<A>,
        from_sequence_number: u64,
    ) -> Result<Vec<EventOf<A>>, EventStoreError> {
        let streams = self
            .streams
            .read()
            .map_err(|_| EventStoreError::Store("lock poisoned".to_string()))?;

        let Some(stream) = streams.get(id) else {
            return Ok(Vec::new());
        };

        stream
            .journal
            .iter()
            .filter(|row| row.sequence_number >= from_sequence_number)
            .map(|row| serde_json::from_value(row.payload.clone()).map_err(EventStoreError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprintboard_workspace::{Workspace, WorkspaceId, WorkspaceName};

    fn created_workspace() -> (Workspace, sprintboard_workspace::WorkspaceEvent) {
        Workspace::create(WorkspaceId::generate(), WorkspaceName::of("platform").unwrap())
    }

    #[test]
    fn creation_brings_the_stream_into_existence_at_version_one() {
        let store = InMemoryEventStore::<Workspace>::new();
        let (workspace, created) = created_workspace();

        store.persist_event_and_snapshot(&created, &workspace).unwrap();

        let loaded = store.get_latest_snapshot_by_id(workspace.id()).unwrap().unwrap();
        assert_eq!(loaded.version(), 1);
        assert_eq!(loaded.sequence_number(), 1);
        assert_eq!(loaded.name(), workspace.name());
    }

    #[test]
    fn double_creation_is_rejected() {
        let store = InMemoryEventStore::<Workspace>::new();
        let (workspace, created) = created_workspace();

        store.persist_event_and_snapshot(&created, &workspace).unwrap();
        assert!(matches!(
            store.persist_event_and_snapshot(&created, &workspace),
            Err(EventStoreError::StreamAlreadyExists(_))
        ));
    }

    #[test]
    fn missing_stream_is_not_found_for_appends_and_none_for_reads() {
        let store = InMemoryEventStore::<Workspace>::new();
        let (workspace, created) = created_workspace();

        assert!(matches!(
            store.persist_event(&created, 1),
            Err(EventStoreError::StreamNotFound(_))
        ));
        assert!(store.get_latest_snapshot_by_id(workspace.id()).unwrap().is_none());
        assert!(store
            .get_events_by_id_since_sequence_number(workspace.id(), 1)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn stale_append_yields_an_optimistic_lock_error() {
        let store = InMemoryEventStore::<Workspace>::new();
        let (workspace, created) = created_workspace();
        store.persist_event_and_snapshot(&created, &workspace).unwrap();

        match store.persist_event(&created, 0) {
            Err(EventStoreError::OptimisticLock { expected: 0, actual: 1 }) => {}
            other => panic!("expected OptimisticLock, got {other:?}"),
        }
    }

    #[test]
    fn events_since_is_inclusive_and_ascending() {
        let store = InMemoryEventStore::<Workspace>::new();
        let (workspace, created) = created_workspace();
        store.persist_event_and_snapshot(&created, &workspace).unwrap();

        let events = store
            .get_events_by_id_since_sequence_number(workspace.id(), 1)
            .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], created);

        assert!(store
            .get_events_by_id_since_sequence_number(workspace.id(), 2)
            .unwrap()
            .is_empty());
    }
}
