//! Stateless query functions, one zero-sized repo per table group.
//!
//! Catalog repos take the catalog `&PgPool`. Rental-store reads and writes
//! that the coordinator runs inside a transaction take `&mut PgConnection`,
//! so callers can pass either a transaction or a pooled connection.

mod customer_repo;
mod movie_repo;
mod person_repo;
mod rental_plan_repo;
mod rental_repo;

pub use customer_repo::CustomerRepo;
pub use movie_repo::MovieRepo;
pub use person_repo::PersonRepo;
pub use rental_plan_repo::RentalPlanRepo;
pub use rental_repo::RentalRepo;
