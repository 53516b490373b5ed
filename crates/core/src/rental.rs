//! Rental rules: commit predicates, transaction outcomes and availability.
//!
//! Every rental-store operation writes first and decides afterwards. The
//! coordinator gathers the facts below from reads taken inside the open
//! transaction, and the predicate alone decides whether the write survives.

use std::fmt;

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Why a rental-store transaction was rolled back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RollbackReason {
    /// The movie id does not exist in the catalog.
    UnknownMovie,
    /// Another customer (or the same one) already holds an open rental.
    MovieAlreadyRented { renter_id: DbId },
    /// The customer has no rentals left under their current plan.
    QuotaExhausted,
    /// The caller does not hold the open rental being returned.
    NotRenter { renter_id: Option<DbId> },
    /// The requested plan id does not exist.
    UnknownPlan,
    /// The customer has no plan assignment to change.
    NoPlanAssignment,
    /// The requested plan allows fewer rentals than the customer has open.
    PlanTooSmall {
        max_rentals: i32,
        current_rentals: i64,
    },
    /// The database aborted the transaction to keep the schedule serializable.
    SerializationConflict,
}

impl fmt::Display for RollbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownMovie => f.write_str("no such movie"),
            Self::MovieAlreadyRented { .. } => f.write_str("movie is already rented"),
            Self::QuotaExhausted => f.write_str("no rentals remaining on current plan"),
            Self::NotRenter { .. } => f.write_str("movie is not rented by this customer"),
            Self::UnknownPlan => f.write_str("no such plan"),
            Self::NoPlanAssignment => f.write_str("customer has no plan to change"),
            Self::PlanTooSmall {
                max_rentals,
                current_rentals,
            } => write!(
                f,
                "plan allows {max_rentals} rentals but {current_rentals} are open"
            ),
            Self::SerializationConflict => f.write_str("conflicting concurrent transaction"),
        }
    }
}

/// Terminal result of a rental-store transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TxOutcome {
    Committed,
    RolledBack(RollbackReason),
}

impl TxOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed)
    }
}

impl From<Result<(), RollbackReason>> for TxOutcome {
    fn from(verdict: Result<(), RollbackReason>) -> Self {
        match verdict {
            Ok(()) => Self::Committed,
            Err(reason) => Self::RolledBack(reason),
        }
    }
}

// ---------------------------------------------------------------------------
// Commit predicates
// ---------------------------------------------------------------------------

/// Facts read inside a `rent` transaction.
#[derive(Debug, Clone, Copy)]
pub struct RentCheck {
    pub remaining_rentals: i64,
    pub renter_id: Option<DbId>,
    pub movie_exists: bool,
}

impl RentCheck {
    /// Commit iff the movie exists, nobody holds it, and quota remains.
    pub fn verdict(&self) -> Result<(), RollbackReason> {
        if !self.movie_exists {
            return Err(RollbackReason::UnknownMovie);
        }
        if let Some(renter_id) = self.renter_id {
            return Err(RollbackReason::MovieAlreadyRented { renter_id });
        }
        if self.remaining_rentals <= 0 {
            return Err(RollbackReason::QuotaExhausted);
        }
        Ok(())
    }
}

/// Facts read inside a `return` transaction.
#[derive(Debug, Clone, Copy)]
pub struct ReturnCheck {
    pub customer_id: DbId,
    pub renter_id: Option<DbId>,
}

impl ReturnCheck {
    /// Only the current renter may close the open record.
    pub fn verdict(&self) -> Result<(), RollbackReason> {
        if self.renter_id == Some(self.customer_id) {
            Ok(())
        } else {
            Err(RollbackReason::NotRenter {
                renter_id: self.renter_id,
            })
        }
    }
}

/// Facts read inside a `choose_plan` transaction.
///
/// `current_max_rentals` is 0 when the customer has no assigned plan, which
/// is also how `remaining_rentals` was computed. `assignment_updated` records
/// whether the in-transaction update found the customer's assignment row.
#[derive(Debug, Clone, Copy)]
pub struct PlanChangeCheck {
    pub current_max_rentals: i32,
    pub remaining_rentals: i64,
    pub new_plan_max_rentals: Option<i32>,
    pub assignment_updated: bool,
}

impl PlanChangeCheck {
    /// Open rentals held right now, derived the same way the ledger does.
    pub fn current_rentals(&self) -> i64 {
        i64::from(self.current_max_rentals) - self.remaining_rentals
    }

    /// Commit iff the plan exists, the customer had an assignment to move,
    /// and the new quota covers every open rental.
    pub fn verdict(&self) -> Result<(), RollbackReason> {
        let Some(max_rentals) = self.new_plan_max_rentals else {
            return Err(RollbackReason::UnknownPlan);
        };
        if !self.assignment_updated {
            return Err(RollbackReason::NoPlanAssignment);
        }
        let current_rentals = self.current_rentals();
        if i64::from(max_rentals) < current_rentals {
            return Err(RollbackReason::PlanTooSmall {
                max_rentals,
                current_rentals,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Transaction state machine
// ---------------------------------------------------------------------------

/// Lifecycle of one coordinator operation. One operation is one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxState {
    NotStarted,
    InTransaction,
    Committed,
    RolledBack,
}

impl TxState {
    pub fn begin(self) -> Result<Self, CoreError> {
        match self {
            Self::NotStarted => Ok(Self::InTransaction),
            other => Err(CoreError::Internal(format!(
                "cannot begin a transaction in state {other:?}"
            ))),
        }
    }

    pub fn commit(self) -> Result<Self, CoreError> {
        self.finish(Self::Committed)
    }

    pub fn roll_back(self) -> Result<Self, CoreError> {
        self.finish(Self::RolledBack)
    }

    fn finish(self, target: Self) -> Result<Self, CoreError> {
        match self {
            Self::InTransaction => Ok(target),
            other => Err(CoreError::Internal(format!(
                "cannot move from {other:?} to {target:?}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

/// Rental status of a movie as seen by one customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Availability {
    #[serde(rename = "AVAILABLE")]
    Available,
    #[serde(rename = "YOU HAVE IT")]
    YouHaveIt,
    #[serde(rename = "UNAVAILABLE")]
    Unavailable,
}

impl Availability {
    pub fn for_viewer(renter_id: Option<DbId>, viewer_id: DbId) -> Self {
        match renter_id {
            None => Self::Available,
            Some(id) if id == viewer_id => Self::YouHaveIt,
            Some(_) => Self::Unavailable,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::YouHaveIt => "YOU HAVE IT",
            Self::Unavailable => "UNAVAILABLE",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
