//! Repository for the catalog `movie` table.

use futures::stream::BoxStream;
use futures::TryStreamExt;
use sqlx::PgPool;
use videostore_core::search::title_pattern;
use videostore_core::types::DbId;

use crate::models::movie::Movie;

/// Case-insensitive title search, ordered by movie id.
const SEARCH_SQL: &str = "SELECT id, name, year FROM movie WHERE name ILIKE $1 ORDER BY id";

/// Read-only access to movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Stream movies whose title contains `title`, ignoring case, in id order.
    ///
    /// Rows are pulled lazily; the stream holds one catalog connection until
    /// it is dropped or exhausted.
    pub fn search<'p>(
        pool: &'p PgPool,
        title: &str,
    ) -> BoxStream<'p, Result<Movie, sqlx::Error>> {
        sqlx::query_as::<_, Movie>(SEARCH_SQL)
            .bind(title_pattern(title))
            .fetch(pool)
    }

    /// Collect every movie matching `title`, in id order.
    pub async fn search_all(pool: &PgPool, title: &str) -> Result<Vec<Movie>, sqlx::Error> {
        Self::search(pool, title).try_collect().await
    }

    /// Whether `id` names a movie in the catalog.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM movie WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
