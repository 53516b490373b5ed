//! Directors and actors.
//!
//! Both tables share the same shape, so one struct serves for either role.

use serde::Serialize;
use sqlx::FromRow;
use videostore_core::search::MovieKeyed;
use videostore_core::types::DbId;

/// A director or actor, aliased from `fname`/`lname` columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Person {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
}

/// A person credited on a movie, as returned by the per-title join queries.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Credit {
    pub movie_id: DbId,
    #[sqlx(flatten)]
    pub person: Person,
}

impl MovieKeyed for Credit {
    fn movie_id(&self) -> DbId {
        self.movie_id
    }
}
