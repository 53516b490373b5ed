//! Text and JSON rendering of store results.
//!
//! Text output keeps the column layout of the interactive client: fixed-width
//! labels for the account summary, a padded table for plans, and indented
//! credit lines under each search hit.

use serde::Serialize;
use videostore_core::rental::TxOutcome;
use videostore_db::models::listing::{MovieListing, PersonalData};
use videostore_db::models::rental_plan::RentalPlan;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

/// Renders results in one [`Format`].
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    format: Format,
}

impl Renderer {
    pub fn new(format: Format) -> Self {
        Self { format }
    }

    pub fn personal_data(&self, data: &PersonalData) -> serde_json::Result<String> {
        self.render(data, personal_data_text)
    }

    pub fn plans(&self, plans: &[RentalPlan]) -> serde_json::Result<String> {
        self.render(plans, plans_text)
    }

    pub fn listings(&self, listings: &[MovieListing]) -> serde_json::Result<String> {
        self.render(listings, listings_text)
    }

    pub fn outcome(&self, outcome: &TxOutcome) -> serde_json::Result<String> {
        self.render(outcome, outcome_text)
    }

    fn render<T: Serialize + ?Sized>(
        &self,
        value: &T,
        text: impl FnOnce(&T) -> String,
    ) -> serde_json::Result<String> {
        match self.format {
            Format::Text => Ok(text(value)),
            Format::Json => serde_json::to_string_pretty(value),
        }
    }
}

// ---------------------------------------------------------------------------
// Text layouts
// ---------------------------------------------------------------------------

fn labelled(label: &str, value: impl std::fmt::Display) -> String {
    format!("{label:<22}{value}")
}

fn personal_data_text(data: &PersonalData) -> String {
    let (plan_name, monthly_fee, max_rentals) = match &data.plan {
        Some(plan) => (plan.name.as_str(), plan.monthly_fee, plan.max_rentals),
        None => ("(none)", 0.0, 0),
    };

    let mut lines = vec![
        "********** User Info **********".to_string(),
        labelled("[cid]: ", data.customer_id),
        labelled(
            "[User Name]: ",
            format!("{} {}", data.first_name, data.last_name),
        ),
        labelled("[Plan Name]: ", plan_name),
        labelled("[Monthly Fee]: ", format!("{monthly_fee:.2}")),
        labelled("[Max Rentals]: ", max_rentals),
        labelled("[Current Rentals]: ", data.current_rentals),
        labelled("[Remaining Rentals]: ", data.remaining_rentals),
    ];
    lines.extend(data.open_rentals.iter().map(|rental| {
        labelled(
            "[Open Rental]: ",
            format!(
                "movie {} since {}",
                rental.movie_id,
                rental.checkout_date.format("%Y-%m-%d %H:%M")
            ),
        )
    }));
    lines.push("*******************************".to_string());
    lines.join("\n")
}

fn plans_text(plans: &[RentalPlan]) -> String {
    let mut lines = vec![
        "********************** Plans **********************".to_string(),
        format!(
            "{:<10}{:<15}{:<14}{}",
            "pid", "name", "max_rentals", "monthly_fee"
        ),
    ];
    lines.extend(plans.iter().map(|plan| {
        format!(
            "{:<10}{:<15}{:<14}${:.2}",
            plan.id, plan.name, plan.max_rentals, plan.monthly_fee
        )
    }));
    lines.push("***************************************************".to_string());
    lines.join("\n")
}

fn listing_text(listing: &MovieListing) -> String {
    let movie = &listing.movie;
    let year = movie.year.map(|y| y.to_string()).unwrap_or_default();

    let mut out = format!("ID: {} NAME: {} YEAR: {}\n", movie.id, movie.name, year);
    for director in &listing.directors {
        out.push_str(&format!(
            "\t\tDirector: {} {}\n",
            director.first_name, director.last_name
        ));
    }
    for actor in &listing.actors {
        out.push_str(&format!(
            "\t\tActor: {} {}\n",
            actor.first_name, actor.last_name
        ));
    }
    out.push_str(&format!(
        "\t\tMovie availability: {}\n",
        listing.availability
    ));
    out
}

fn listings_text(listings: &[MovieListing]) -> String {
    listings.iter().map(listing_text).collect()
}

fn outcome_text(outcome: &TxOutcome) -> String {
    match outcome {
        TxOutcome::Committed => "Commit transaction".to_string(),
        TxOutcome::RolledBack(reason) => format!("Rollback transaction ({reason})"),
    }
}
