use serde::Serialize;
use sqlx::FromRow;
use videostore_core::types::DbId;

/// A row from the `rental_plans` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct RentalPlan {
    #[sqlx(rename = "pid")]
    pub id: DbId,
    pub name: String,
    pub max_rentals: i32,
    pub monthly_fee: f64,
}
