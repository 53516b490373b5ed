//! Movie rows from the catalog `movie` table.

use serde::Serialize;
use sqlx::FromRow;
use videostore_core::search::MovieKeyed;
use videostore_core::types::DbId;

/// A row from the `movie` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Movie {
    pub id: DbId,
    pub name: String,
    pub year: Option<i32>,
}

impl MovieKeyed for Movie {
    fn movie_id(&self) -> DbId {
        self.id
    }
}
