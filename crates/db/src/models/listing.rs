//! Result types returned to the presentation layer.

use serde::Serialize;
use videostore_core::rental::Availability;
use videostore_core::types::DbId;

use super::movie::Movie;
use super::person::Person;
use super::rental::RentalRecord;
use super::rental_plan::RentalPlan;

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// One search hit: the movie, its credits, and whether the viewer can rent it.
///
/// Both search strategies produce identical listings for the same catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieListing {
    pub movie: Movie,
    pub directors: Vec<Person>,
    pub actors: Vec<Person>,
    pub availability: Availability,
}

// ---------------------------------------------------------------------------
// Personal data
// ---------------------------------------------------------------------------

/// Account summary for the logged-in customer.
#[derive(Debug, Clone, Serialize)]
pub struct PersonalData {
    pub customer_id: DbId,
    pub first_name: String,
    pub last_name: String,
    /// `None` when the customer has no plan assignment.
    pub plan: Option<RentalPlan>,
    pub current_rentals: i64,
    pub remaining_rentals: i64,
    pub open_rentals: Vec<RentalRecord>,
}
