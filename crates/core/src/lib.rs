//! Domain logic for the video store that needs no database.
//!
//! Commit predicates, the transaction state machine, availability
//! derivation and the merge-join used by fast search all live here so they
//! can be unit tested without a Postgres instance.

pub mod error;
pub mod rental;
pub mod search;
pub mod types;
