//! Aggregate root trait for event-sourced domain models.

/// Aggregate root marker + minimal interface.
///
/// An aggregate is an independent consistency boundary: its entire state is
/// derived from its own event history, and concurrent writers are coordinated
/// only through the store's expected-version check.
pub trait Aggregate {
    /// Strongly-typed aggregate identifier.
    type Id: Clone
        + Eq
        + core::hash::Hash
        + core::fmt::Debug
        + core::fmt::Display
        + Send
        + Sync
        + 'static;

    /// Returns the aggregate identifier.
    fn id(&self) -> &Self::Id;

    /// Domain-level event counter: starts at 1 on creation and increases by
    /// exactly 1 per applied event, with no gaps.
    fn sequence_number(&self) -> u64;

    /// Persistence-layer optimistic-concurrency token.
    ///
    /// Never touched by domain logic; only the store advances it on a
    /// successful persist. Independent of [`Aggregate::sequence_number`].
    fn version(&self) -> u64;

    /// Returns a copy at the given persistence version.
    ///
    /// For the store's use when rehydrating a snapshot at its current
    /// version; commands and replay never call this.
    fn with_version(self, version: u64) -> Self;
}
