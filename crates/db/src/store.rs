//! Caller-facing entry points.
//!
//! [`VideoStore`] owns the two sessions and exposes one method per user
//! action. Every method returns structured data; rendering is left to the
//! caller.

use videostore_core::error::CoreError;
use videostore_core::rental::TxOutcome;
use videostore_core::types::DbId;

use crate::config::DbConfig;
use crate::coordinator::Coordinator;
use crate::error::StoreResult;
use crate::models::listing::{MovieListing, PersonalData};
use crate::models::rental_plan::RentalPlan;
use crate::repositories::{CustomerRepo, RentalPlanRepo, RentalRepo};
use crate::search::{self, SearchStrategy};
use crate::Sessions;

/// The video store over its catalog and rental-store sessions.
#[derive(Debug, Clone)]
pub struct VideoStore {
    sessions: Sessions,
}

impl VideoStore {
    pub fn new(sessions: Sessions) -> Self {
        Self { sessions }
    }

    /// Open both sessions described by `config`.
    pub async fn connect(config: &DbConfig) -> StoreResult<Self> {
        Ok(Self::new(Sessions::connect(config).await?))
    }

    /// Release both sessions.
    pub async fn close(&self) {
        self.sessions.close().await;
    }

    /// Authenticate a customer. `None` means no customer matches.
    pub async fn login(&self, login: &str, password: &str) -> StoreResult<Option<DbId>> {
        let customer_id = CustomerRepo::login(&self.sessions.rentals, login, password).await?;
        match customer_id {
            Some(id) => tracing::info!(customer_id = id, "Customer logged in"),
            None => tracing::info!(login, "Login rejected"),
        }
        Ok(customer_id)
    }

    /// Title search using per-movie sub-queries.
    pub async fn search(&self, customer_id: DbId, title: &str) -> StoreResult<Vec<MovieListing>> {
        Ok(search::search(&self.sessions, SearchStrategy::DependentJoin, customer_id, title).await?)
    }

    /// Title search using the three-way merge join.
    pub async fn fast_search(
        &self,
        customer_id: DbId,
        title: &str,
    ) -> StoreResult<Vec<MovieListing>> {
        Ok(search::search(&self.sessions, SearchStrategy::MergeJoin, customer_id, title).await?)
    }

    pub async fn rent(&self, customer_id: DbId, movie_id: DbId) -> StoreResult<TxOutcome> {
        Coordinator::new(&self.sessions).rent(customer_id, movie_id).await
    }

    pub async fn return_movie(&self, customer_id: DbId, movie_id: DbId) -> StoreResult<TxOutcome> {
        Coordinator::new(&self.sessions)
            .return_movie(customer_id, movie_id)
            .await
    }

    pub async fn choose_plan(&self, customer_id: DbId, plan_id: DbId) -> StoreResult<TxOutcome> {
        Coordinator::new(&self.sessions)
            .choose_plan(customer_id, plan_id)
            .await
    }

    pub async fn list_plans(&self) -> StoreResult<Vec<RentalPlan>> {
        Ok(RentalPlanRepo::list(&self.sessions.rentals).await?)
    }

    /// Account summary: name, plan, and rental counts.
    ///
    /// Returns [`CoreError::NotFound`] for an unknown customer id.
    pub async fn personal_data(&self, customer_id: DbId) -> StoreResult<PersonalData> {
        let mut conn = self.sessions.rentals.acquire().await?;

        let (first_name, last_name) = CustomerRepo::name(&mut conn, customer_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "customer",
                id: customer_id,
            })?;
        let plan = RentalPlanRepo::find_for_customer(&mut conn, customer_id).await?;
        let remaining_rentals = RentalRepo::remaining_rentals(&mut conn, customer_id).await?;
        let open_rentals = RentalRepo::list_open_by_customer(&mut conn, customer_id).await?;

        let max_rentals = plan.as_ref().map_or(0, |p| i64::from(p.max_rentals));

        Ok(PersonalData {
            customer_id,
            first_name,
            last_name,
            plan,
            current_rentals: max_rentals - remaining_rentals,
            remaining_rentals,
            open_rentals,
        })
    }
}
