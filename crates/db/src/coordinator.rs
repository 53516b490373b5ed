//! Transaction coordinator for rent, return and choose-plan.
//!
//! Every operation follows the same shape: begin a serializable
//! transaction, gather the facts its predicate needs, issue the mutating
//! statement unconditionally, then commit or roll back on the predicate.
//! The write happens before the decision, so a rejected request still
//! performs its write inside the transaction that is then aborted.

use sqlx::{PgConnection, PgPool};
use videostore_core::rental::{
    PlanChangeCheck, RentCheck, ReturnCheck, RollbackReason, TxOutcome,
};
use videostore_core::types::DbId;

use crate::error::{StoreError, StoreResult};
use crate::repositories::{MovieRepo, RentalPlanRepo, RentalRepo};
use crate::transaction::SerializableTx;
use crate::Sessions;

/// Runs the rental-store transactions against a pair of sessions.
#[derive(Debug, Clone, Copy)]
pub struct Coordinator<'a> {
    catalog: &'a PgPool,
    rentals: &'a PgPool,
}

impl<'a> Coordinator<'a> {
    pub fn new(sessions: &'a Sessions) -> Self {
        Self {
            catalog: &sessions.catalog,
            rentals: &sessions.rentals,
        }
    }

    /// Rent `movie_id` to `customer_id`.
    ///
    /// Commits iff the movie exists, nobody holds it, and the customer has
    /// rentals left on their current plan.
    pub async fn rent(&self, customer_id: DbId, movie_id: DbId) -> StoreResult<TxOutcome> {
        tracing::debug!(customer_id, movie_id, "Rent requested");
        let mut tx = SerializableTx::begin(self.rentals, "rent").await?;
        let step = rent_step(tx.conn(), self.catalog, customer_id, movie_id).await;
        let verdict = match step {
            Ok(verdict) => verdict,
            Err(err) => return settle_failure(tx.abort(err).await),
        };
        settle(tx.resolve(verdict).await)
    }

    /// Return `movie_id` on behalf of `customer_id`.
    ///
    /// Commits iff `customer_id` held the open rental when the transaction
    /// read it.
    pub async fn return_movie(&self, customer_id: DbId, movie_id: DbId) -> StoreResult<TxOutcome> {
        tracing::debug!(customer_id, movie_id, "Return requested");
        let mut tx = SerializableTx::begin(self.rentals, "return").await?;
        let step = return_step(tx.conn(), customer_id, movie_id).await;
        let verdict = match step {
            Ok(verdict) => verdict,
            Err(err) => return settle_failure(tx.abort(err).await),
        };
        settle(tx.resolve(verdict).await)
    }

    /// Move `customer_id` onto `plan_id`.
    ///
    /// Commits iff the plan exists, the customer already has a plan
    /// assignment, and the new quota covers the rentals they hold.
    pub async fn choose_plan(&self, customer_id: DbId, plan_id: DbId) -> StoreResult<TxOutcome> {
        tracing::debug!(customer_id, plan_id, "Plan change requested");
        let mut tx = SerializableTx::begin(self.rentals, "choose_plan").await?;
        let step = choose_plan_step(tx.conn(), customer_id, plan_id).await;
        let verdict = match step {
            Ok(verdict) => verdict,
            Err(err) => return settle_failure(tx.abort(err).await),
        };
        settle(tx.resolve(verdict).await)
    }
}

// ---------------------------------------------------------------------------
// Transaction bodies
// ---------------------------------------------------------------------------

async fn rent_step(
    conn: &mut PgConnection,
    catalog: &PgPool,
    customer_id: DbId,
    movie_id: DbId,
) -> StoreResult<Result<(), RollbackReason>> {
    let remaining_rentals = RentalRepo::remaining_rentals(conn, customer_id).await?;
    let renter_id = RentalRepo::renter_of(conn, movie_id).await?;
    let movie_exists = MovieRepo::exists(catalog, movie_id).await?;

    RentalRepo::insert_open(conn, customer_id, movie_id).await?;

    Ok(RentCheck {
        remaining_rentals,
        renter_id,
        movie_exists,
    }
    .verdict())
}

async fn return_step(
    conn: &mut PgConnection,
    customer_id: DbId,
    movie_id: DbId,
) -> StoreResult<Result<(), RollbackReason>> {
    let renter_id = RentalRepo::renter_of(conn, movie_id).await?;

    RentalRepo::close_open(conn, customer_id, movie_id).await?;

    Ok(ReturnCheck {
        customer_id,
        renter_id,
    }
    .verdict())
}

async fn choose_plan_step(
    conn: &mut PgConnection,
    customer_id: DbId,
    plan_id: DbId,
) -> StoreResult<Result<(), RollbackReason>> {
    let current_max_rentals = RentalPlanRepo::find_for_customer(conn, customer_id)
        .await?
        .map_or(0, |plan| plan.max_rentals);
    let remaining_rentals = RentalRepo::remaining_rentals(conn, customer_id).await?;
    let new_plan_max_rentals = RentalPlanRepo::find_by_id(conn, plan_id)
        .await?
        .map(|plan| plan.max_rentals);

    let updated = RentalPlanRepo::assign(conn, customer_id, plan_id).await?;

    Ok(PlanChangeCheck {
        current_max_rentals,
        remaining_rentals,
        new_plan_max_rentals,
        assignment_updated: updated > 0,
    }
    .verdict())
}

// ---------------------------------------------------------------------------
// Serialization failures
// ---------------------------------------------------------------------------

/// A serialization failure is the database deciding the race; report it as
/// a rollback rather than an error.
fn settle(result: StoreResult<TxOutcome>) -> StoreResult<TxOutcome> {
    match result {
        Err(err) => settle_failure(err),
        ok => ok,
    }
}

fn settle_failure(err: StoreError) -> StoreResult<TxOutcome> {
    if err.is_serialization_failure() {
        tracing::info!("Rollback transaction: serialization conflict");
        Ok(TxOutcome::RolledBack(RollbackReason::SerializationConflict))
    } else {
        Err(err)
    }
}
