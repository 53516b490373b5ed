//! Repository for directors and actors and their movie links.
//!
//! Per-movie and per-title queries use the same in-movie ordering
//! (last name, first name, id) so both search strategies list credits
//! identically.

use sqlx::PgPool;
use videostore_core::search::title_pattern;
use videostore_core::types::DbId;

use crate::models::person::{Credit, Person};

/// Read-only access to the people credited on movies.
pub struct PersonRepo;

impl PersonRepo {
    /// Directors of one movie.
    pub async fn directors_of(pool: &PgPool, movie_id: DbId) -> Result<Vec<Person>, sqlx::Error> {
        sqlx::query_as::<_, Person>(
            "SELECT d.id, d.fname AS first_name, d.lname AS last_name
             FROM movie_directors md
             JOIN directors d ON d.id = md.did
             WHERE md.mid = $1
             ORDER BY last_name, first_name, id",
        )
        .bind(movie_id)
        .fetch_all(pool)
        .await
    }

    /// Actors of one movie. An actor cast in several roles appears once.
    pub async fn actors_of(pool: &PgPool, movie_id: DbId) -> Result<Vec<Person>, sqlx::Error> {
        sqlx::query_as::<_, Person>(
            "SELECT DISTINCT a.id, a.fname AS first_name, a.lname AS last_name
             FROM casts c
             JOIN actor a ON a.id = c.pid
             WHERE c.mid = $1
             ORDER BY last_name, first_name, id",
        )
        .bind(movie_id)
        .fetch_all(pool)
        .await
    }

    /// Director credits for every movie matching `title`, ordered by movie id.
    pub async fn directors_for_title(
        pool: &PgPool,
        title: &str,
    ) -> Result<Vec<Credit>, sqlx::Error> {
        sqlx::query_as::<_, Credit>(
            "SELECT DISTINCT m.id AS movie_id, d.id, d.fname AS first_name, d.lname AS last_name
             FROM movie m
             JOIN movie_directors md ON md.mid = m.id
             JOIN directors d ON d.id = md.did
             WHERE m.name ILIKE $1
             ORDER BY movie_id, last_name, first_name, id",
        )
        .bind(title_pattern(title))
        .fetch_all(pool)
        .await
    }

    /// Actor credits for every movie matching `title`, ordered by movie id.
    pub async fn actors_for_title(pool: &PgPool, title: &str) -> Result<Vec<Credit>, sqlx::Error> {
        sqlx::query_as::<_, Credit>(
            "SELECT DISTINCT m.id AS movie_id, a.id, a.fname AS first_name, a.lname AS last_name
             FROM movie m
             JOIN casts c ON c.mid = m.id
             JOIN actor a ON a.id = c.pid
             WHERE m.name ILIKE $1
             ORDER BY movie_id, last_name, first_name, id",
        )
        .bind(title_pattern(title))
        .fetch_all(pool)
        .await
    }
}
