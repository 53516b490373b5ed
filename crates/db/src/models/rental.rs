//! Rental records from the `customer_rentals` table.
//!
//! Records are never deleted: returning a movie flips `status` to
//! `closed` and keeps the row as history.

use serde::Serialize;
use sqlx::FromRow;
use videostore_core::types::{DbId, Timestamp};

/// Status value of a rental that is still checked out.
pub const STATUS_OPEN: &str = "open";

/// Status value of a returned rental.
pub const STATUS_CLOSED: &str = "closed";

/// A row from the `customer_rentals` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RentalRecord {
    pub id: DbId,
    #[sqlx(rename = "cid")]
    pub customer_id: DbId,
    #[sqlx(rename = "mid")]
    pub movie_id: DbId,
    pub status: String,
    pub checkout_date: Timestamp,
}
