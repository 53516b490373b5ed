//! Catalog search with per-customer availability.
//!
//! Two strategies answer the same question. [`SearchStrategy::DependentJoin`]
//! walks the matching movies and runs a director and an actor sub-query for
//! each one. [`SearchStrategy::MergeJoin`] runs three title queries sorted by
//! movie id and stitches them together with
//! [`videostore_core::search::merge_join`].

use futures::TryStreamExt;
use sqlx::PgPool;
use videostore_core::rental::Availability;
use videostore_core::search::merge_join;
use videostore_core::types::DbId;

use crate::models::listing::MovieListing;
use crate::models::movie::Movie;
use crate::repositories::{MovieRepo, PersonRepo, RentalRepo};
use crate::Sessions;

/// How [`search`] assembles movie credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    /// One director and one actor query per matching movie.
    DependentJoin,
    /// Three sorted title queries merged in a single pass.
    MergeJoin,
}

/// Find movies whose title contains `title` and describe them for `viewer_id`.
///
/// Listings come back in ascending movie id order whichever strategy runs.
pub async fn search(
    sessions: &Sessions,
    strategy: SearchStrategy,
    viewer_id: DbId,
    title: &str,
) -> Result<Vec<MovieListing>, sqlx::Error> {
    let listings = match strategy {
        SearchStrategy::DependentJoin => {
            dependent_join(&sessions.catalog, &sessions.rentals, viewer_id, title).await?
        }
        SearchStrategy::MergeJoin => {
            merge_join_search(&sessions.catalog, &sessions.rentals, viewer_id, title).await?
        }
    };
    tracing::debug!(?strategy, title, hits = listings.len(), "Search finished");
    Ok(listings)
}

async fn dependent_join(
    catalog: &PgPool,
    rentals: &PgPool,
    viewer_id: DbId,
    title: &str,
) -> Result<Vec<MovieListing>, sqlx::Error> {
    let mut rental_conn = rentals.acquire().await?;
    let mut movies = MovieRepo::search(catalog, title);
    let mut listings = Vec::new();

    while let Some(movie) = movies.try_next().await? {
        let directors = PersonRepo::directors_of(catalog, movie.id).await?;
        let actors = PersonRepo::actors_of(catalog, movie.id).await?;
        let renter_id = RentalRepo::renter_of(&mut rental_conn, movie.id).await?;

        listings.push(MovieListing {
            movie,
            directors,
            actors,
            availability: Availability::for_viewer(renter_id, viewer_id),
        });
    }

    Ok(listings)
}

async fn merge_join_search(
    catalog: &PgPool,
    rentals: &PgPool,
    viewer_id: DbId,
    title: &str,
) -> Result<Vec<MovieListing>, sqlx::Error> {
    let (movies, directors, actors) = tokio::try_join!(
        MovieRepo::search_all(catalog, title),
        PersonRepo::directors_for_title(catalog, title),
        PersonRepo::actors_for_title(catalog, title),
    )?;

    let movie_ids: Vec<DbId> = movies.iter().map(|m: &Movie| m.id).collect();
    let renters = RentalRepo::renters_of(rentals, &movie_ids).await?;

    let listings = merge_join(movies, directors, actors)
        .map(|merged| {
            let renter_id = renters.get(&merged.movie.id).copied();
            MovieListing {
                movie: merged.movie,
                directors: merged.directors.into_iter().map(|c| c.person).collect(),
                actors: merged.actors.into_iter().map(|c| c.person).collect(),
                availability: Availability::for_viewer(renter_id, viewer_id),
            }
        })
        .collect();

    Ok(listings)
}
