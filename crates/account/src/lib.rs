//! Account domain module (event-sourced).
//!
//! The reduced form of the aggregate pattern: one creation event, no further
//! commands, same replay and repository contracts as the richer aggregates.

pub mod account;

pub use account::{
    Account, AccountCreated, AccountEmail, AccountEvent, AccountId, AccountName, AccountRole,
};
