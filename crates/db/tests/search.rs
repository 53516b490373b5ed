//! Integration tests for catalog search.
//!
//! Covers the per-movie sub-query search, the merge-join search, and the
//! availability each one reports to the viewer.

mod common;

use sqlx::PgPool;
use videostore_core::rental::Availability;
use videostore_db::models::listing::MovieListing;

use common::PREMIUM;

/// Two "Matrix" movies, each with two directors and three actors, plus one
/// movie that never matches.
async fn seed_matrix_catalog(pool: &PgPool) {
    common::add_movie(pool, 10, "The Matrix", 1999).await;
    common::add_movie(pool, 20, "The Matrix Reloaded", 2003).await;
    common::add_movie(pool, 30, "Memento", 2000).await;

    for movie_id in [10, 20] {
        common::add_director(pool, 1, "Lana", "Wachowski", movie_id).await;
        common::add_director(pool, 2, "Lilly", "Wachowski", movie_id).await;
        common::add_actor(pool, 100, "Keanu", "Reeves", movie_id).await;
        common::add_actor(pool, 101, "Laurence", "Fishburne", movie_id).await;
        common::add_actor(pool, 102, "Carrie-Anne", "Moss", movie_id).await;
    }
    common::add_director(pool, 3, "Christopher", "Nolan", 30).await;
    common::add_actor(pool, 103, "Guy", "Pearce", 30).await;
}

fn names(listing: &MovieListing) -> (Vec<&str>, Vec<&str>) {
    (
        listing.directors.iter().map(|p| p.last_name.as_str()).collect(),
        listing.actors.iter().map(|p| p.last_name.as_str()).collect(),
    )
}

// ---------------------------------------------------------------------------
// Test: dependent-join search
// ---------------------------------------------------------------------------

/// Scenario: each matching movie lists its two directors and three actors.
#[sqlx::test(migrations = false)]
async fn search_lists_movies_with_credits(pool: PgPool) {
    let store = common::store(pool.clone()).await;
    common::seed_plans(&pool).await;
    seed_matrix_catalog(&pool).await;
    let c = common::add_customer(&pool, "carol", PREMIUM).await;

    let listings = store.search(c, "matrix").await.unwrap();

    let ids: Vec<i64> = listings.iter().map(|l| l.movie.id).collect();
    assert_eq!(ids, vec![10, 20]);
    for listing in &listings {
        let (directors, actors) = names(listing);
        assert_eq!(directors, vec!["Wachowski", "Wachowski"]);
        assert_eq!(actors, vec!["Fishburne", "Moss", "Reeves"]);
        assert_eq!(listing.availability, Availability::Available);
    }
    assert_eq!(listings[0].movie.year, Some(1999));
}

#[sqlx::test(migrations = false)]
async fn search_without_matches_is_empty(pool: PgPool) {
    let store = common::store(pool.clone()).await;
    common::seed_plans(&pool).await;
    seed_matrix_catalog(&pool).await;
    let c = common::add_customer(&pool, "carol", PREMIUM).await;

    assert!(store.search(c, "casablanca").await.unwrap().is_empty());
    assert!(store.fast_search(c, "casablanca").await.unwrap().is_empty());
}

#[sqlx::test(migrations = false)]
async fn actor_with_several_roles_is_listed_once(pool: PgPool) {
    let store = common::store(pool.clone()).await;
    common::seed_plans(&pool).await;
    common::add_movie(&pool, 40, "Multiplicity", 1996).await;
    common::add_actor(&pool, 200, "Michael", "Keaton", 40).await;
    sqlx::query("INSERT INTO casts (pid, mid, role) VALUES (200, 40, 'Doug #2')")
        .execute(&pool)
        .await
        .unwrap();
    let c = common::add_customer(&pool, "carol", PREMIUM).await;

    let slow = store.search(c, "multi").await.unwrap();
    let fast = store.fast_search(c, "multi").await.unwrap();

    assert_eq!(slow[0].actors.len(), 1);
    assert_eq!(slow, fast);
}

// ---------------------------------------------------------------------------
// Test: merge-join search
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn fast_search_matches_dependent_join(pool: PgPool) {
    let store = common::store(pool.clone()).await;
    common::seed_plans(&pool).await;
    seed_matrix_catalog(&pool).await;
    let c = common::add_customer(&pool, "carol", PREMIUM).await;

    for title in ["matrix", "MATRIX", "e", "memento", ""] {
        let slow = store.search(c, title).await.unwrap();
        let fast = store.fast_search(c, title).await.unwrap();
        assert_eq!(slow, fast, "strategies disagree for {title:?}");
    }
}

/// A movie with no directors or actors still appears, with empty credits.
#[sqlx::test(migrations = false)]
async fn uncredited_movie_is_listed(pool: PgPool) {
    let store = common::store(pool.clone()).await;
    common::seed_plans(&pool).await;
    seed_matrix_catalog(&pool).await;
    common::add_movie(&pool, 15, "The Matrix Revisited", 2001).await;
    let c = common::add_customer(&pool, "carol", PREMIUM).await;

    let fast = store.fast_search(c, "matrix").await.unwrap();

    let ids: Vec<i64> = fast.iter().map(|l| l.movie.id).collect();
    assert_eq!(ids, vec![10, 15, 20]);
    assert!(fast[1].directors.is_empty());
    assert!(fast[1].actors.is_empty());
    // Neighbours keep their own credits.
    assert_eq!(fast[2].actors.len(), 3);

    assert_eq!(store.search(c, "matrix").await.unwrap(), fast);
}

// ---------------------------------------------------------------------------
// Test: availability
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn availability_depends_on_viewer(pool: PgPool) {
    let store = common::store(pool.clone()).await;
    common::seed_plans(&pool).await;
    seed_matrix_catalog(&pool).await;
    let carol = common::add_customer(&pool, "carol", PREMIUM).await;
    let dave = common::add_customer(&pool, "dave", PREMIUM).await;
    assert!(store.rent(carol, 10).await.unwrap().is_committed());

    for listings in [
        store.search(carol, "matrix").await.unwrap(),
        store.fast_search(carol, "matrix").await.unwrap(),
    ] {
        assert_eq!(listings[0].availability, Availability::YouHaveIt);
        assert_eq!(listings[1].availability, Availability::Available);
    }
    for listings in [
        store.search(dave, "matrix").await.unwrap(),
        store.fast_search(dave, "matrix").await.unwrap(),
    ] {
        assert_eq!(listings[0].availability, Availability::Unavailable);
        assert_eq!(listings[1].availability, Availability::Available);
    }

    assert!(store.return_movie(carol, 10).await.unwrap().is_committed());
    let listings = store.search(dave, "matrix").await.unwrap();
    assert_eq!(listings[0].availability, Availability::Available);
}

// ---------------------------------------------------------------------------
// Test: pattern escaping
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn wildcards_in_title_match_literally(pool: PgPool) {
    let store = common::store(pool.clone()).await;
    common::seed_plans(&pool).await;
    common::add_movie(&pool, 50, "100% Love", 2011).await;
    common::add_movie(&pool, 51, "1000 Ways", 2009).await;
    common::add_movie(&pool, 52, "Snake_Eyes", 1998).await;
    common::add_movie(&pool, 53, "Snake Eyes", 1998).await;
    let c = common::add_customer(&pool, "carol", PREMIUM).await;

    let hits = store.search(c, "100%").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].movie.id, 50);

    let hits = store.fast_search(c, "e_e").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].movie.id, 52);
}
