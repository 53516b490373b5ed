//! Repository for the `customer_rentals` table.
//!
//! The single-renter and quota rules are not schema constraints; these
//! reads are what the coordinator checks them with.

use std::collections::HashMap;

use sqlx::{PgConnection, PgPool};
use videostore_core::types::DbId;

use crate::models::rental::{RentalRecord, STATUS_CLOSED, STATUS_OPEN};

/// Column list for customer_rentals queries.
const COLUMNS: &str = "id, cid, mid, status, checkout_date";

/// Quota and occupancy facts, plus the rental writes.
pub struct RentalRepo;

impl RentalRepo {
    /// Assigned plan's `max_rentals` minus the customer's open rentals.
    ///
    /// A customer without a plan has a quota of 0, so the result can be
    /// negative.
    pub async fn remaining_rentals(
        conn: &mut PgConnection,
        customer_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COALESCE(
                        (SELECT p.max_rentals::BIGINT
                         FROM has_plan h
                         JOIN rental_plans p ON p.pid = h.pid
                         WHERE h.cid = $1),
                        0)
                  - (SELECT COUNT(*) FROM customer_rentals
                     WHERE cid = $1 AND status = $2)",
        )
        .bind(customer_id)
        .bind(STATUS_OPEN)
        .fetch_one(conn)
        .await?;
        Ok(row.0)
    }

    /// The customer holding an open rental on `movie_id`, if any.
    pub async fn renter_of(
        conn: &mut PgConnection,
        movie_id: DbId,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "SELECT cid FROM customer_rentals
             WHERE mid = $1 AND status = $2
             ORDER BY checkout_date, id
             LIMIT 1",
        )
        .bind(movie_id)
        .bind(STATUS_OPEN)
        .fetch_optional(conn)
        .await?;
        Ok(row.map(|r| r.0))
    }

    /// Batched [`Self::renter_of`]: movie id to renter id, for rented movies only.
    pub async fn renters_of(
        pool: &PgPool,
        movie_ids: &[DbId],
    ) -> Result<HashMap<DbId, DbId>, sqlx::Error> {
        if movie_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows: Vec<(DbId, DbId)> = sqlx::query_as(
            "SELECT DISTINCT ON (mid) mid, cid FROM customer_rentals
             WHERE status = $1 AND mid = ANY($2)
             ORDER BY mid, checkout_date, id",
        )
        .bind(STATUS_OPEN)
        .bind(movie_ids)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().collect())
    }

    /// Open rentals of one customer, oldest first.
    pub async fn list_open_by_customer(
        conn: &mut PgConnection,
        customer_id: DbId,
    ) -> Result<Vec<RentalRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM customer_rentals
             WHERE cid = $1 AND status = $2
             ORDER BY checkout_date, id"
        );
        sqlx::query_as::<_, RentalRecord>(&query)
            .bind(customer_id)
            .bind(STATUS_OPEN)
            .fetch_all(conn)
            .await
    }

    /// Insert an open rental checked out now, returning the created row.
    pub async fn insert_open(
        conn: &mut PgConnection,
        customer_id: DbId,
        movie_id: DbId,
    ) -> Result<RentalRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO customer_rentals (cid, mid, status, checkout_date)
             VALUES ($1, $2, $3, NOW())
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RentalRecord>(&query)
            .bind(customer_id)
            .bind(movie_id)
            .bind(STATUS_OPEN)
            .fetch_one(conn)
            .await
    }

    /// Close the customer's open rental of a movie.
    ///
    /// Returns the number of rows closed; the record itself is kept.
    pub async fn close_open(
        conn: &mut PgConnection,
        customer_id: DbId,
        movie_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE customer_rentals SET status = $1
             WHERE cid = $2 AND mid = $3 AND status = $4",
        )
        .bind(STATUS_CLOSED)
        .bind(customer_id)
        .bind(movie_id)
        .bind(STATUS_OPEN)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }
}
