//! Row structs for both databases and the result types built from them.
//!
//! Catalog rows (`movie`, `person`) are read-only. Rental-store rows
//! (`rental_plan`, `rental`) are read and written inside the
//! coordinator's transactions.

pub mod listing;
pub mod movie;
pub mod person;
pub mod rental;
pub mod rental_plan;
