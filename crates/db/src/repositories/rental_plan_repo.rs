//! Repository for the `rental_plans` and `has_plan` tables.

use sqlx::{PgConnection, PgPool};
use videostore_core::types::DbId;

use crate::models::rental_plan::RentalPlan;

/// Column list for rental_plans queries.
const COLUMNS: &str = "pid, name, max_rentals, monthly_fee";

/// Plan catalogue and per-customer plan assignment.
pub struct RentalPlanRepo;

impl RentalPlanRepo {
    /// List every plan, by plan id.
    pub async fn list(pool: &PgPool) -> Result<Vec<RentalPlan>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rental_plans ORDER BY pid");
        sqlx::query_as::<_, RentalPlan>(&query).fetch_all(pool).await
    }

    /// Find a plan by primary key.
    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<RentalPlan>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rental_plans WHERE pid = $1");
        sqlx::query_as::<_, RentalPlan>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Whether `id` names an existing plan.
    pub async fn is_valid(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        Ok(Self::find_by_id(conn, id).await?.is_some())
    }

    /// The plan currently assigned to a customer, if any.
    pub async fn find_for_customer(
        conn: &mut PgConnection,
        customer_id: DbId,
    ) -> Result<Option<RentalPlan>, sqlx::Error> {
        sqlx::query_as::<_, RentalPlan>(
            "SELECT p.pid, p.name, p.max_rentals, p.monthly_fee
             FROM has_plan h
             JOIN rental_plans p ON p.pid = h.pid
             WHERE h.cid = $1",
        )
        .bind(customer_id)
        .fetch_optional(conn)
        .await
    }

    /// Point the customer's single assignment row at `plan_id`.
    ///
    /// Updates in place; never inserts. Returns the number of rows touched.
    pub async fn assign(
        conn: &mut PgConnection,
        customer_id: DbId,
        plan_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE has_plan SET pid = $1 WHERE cid = $2")
            .bind(plan_id)
            .bind(customer_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }
}
