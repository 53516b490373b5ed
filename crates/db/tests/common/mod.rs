//! Shared fixtures for the database integration tests.
//!
//! `#[sqlx::test]` hands each test a fresh database. Both schemas are
//! migrated onto it and the same pool serves as catalog and rental store.

#![allow(dead_code)]

use sqlx::PgPool;
use videostore_db::{Sessions, VideoStore};

pub const BASIC: i64 = 1;
pub const PREMIUM: i64 = 2;

/// Migrate both schemas onto `pool` and wrap it as a store.
pub async fn store(pool: PgPool) -> VideoStore {
    let sessions = Sessions::new(pool.clone(), pool);
    videostore_db::run_migrations(&sessions)
        .await
        .expect("migrations should apply");
    VideoStore::new(sessions)
}

/// Seed the two plans used throughout: Basic (1 rental) and Premium (3 rentals).
pub async fn seed_plans(pool: &PgPool) {
    sqlx::query(
        "INSERT INTO rental_plans (pid, name, max_rentals, monthly_fee) VALUES
            (1, 'Basic', 1, 4.99),
            (2, 'Premium', 3, 9.99)",
    )
    .execute(pool)
    .await
    .expect("plans should insert");
}

/// Create a customer on `plan_id` and return their id.
pub async fn add_customer(pool: &PgPool, login: &str, plan_id: i64) -> i64 {
    let cid = add_customer_without_plan(pool, login).await;
    sqlx::query("INSERT INTO has_plan (cid, pid) VALUES ($1, $2)")
        .bind(cid)
        .bind(plan_id)
        .execute(pool)
        .await
        .expect("plan assignment should insert");
    cid
}

/// Create a customer with no `has_plan` row and return their id.
pub async fn add_customer_without_plan(pool: &PgPool, login: &str) -> i64 {
    let (cid,): (i64,) = sqlx::query_as(
        "INSERT INTO customers (login, password, fname, lname)
         VALUES ($1, $2, $3, 'Tester')
         RETURNING cid",
    )
    .bind(login)
    .bind(format!("{login}-pw"))
    .bind(login.to_uppercase())
    .fetch_one(pool)
    .await
    .expect("customer should insert");
    cid
}

pub async fn add_movie(pool: &PgPool, id: i64, name: &str, year: i32) {
    sqlx::query("INSERT INTO movie (id, name, year) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(name)
        .bind(year)
        .execute(pool)
        .await
        .expect("movie should insert");
}

/// Insert a director (if new) and credit them on `movie_id`.
pub async fn add_director(pool: &PgPool, id: i64, first: &str, last: &str, movie_id: i64) {
    sqlx::query("INSERT INTO directors (id, fname, lname) VALUES ($1, $2, $3) ON CONFLICT DO NOTHING")
        .bind(id)
        .bind(first)
        .bind(last)
        .execute(pool)
        .await
        .expect("director should insert");
    sqlx::query("INSERT INTO movie_directors (mid, did) VALUES ($1, $2)")
        .bind(movie_id)
        .bind(id)
        .execute(pool)
        .await
        .expect("movie_directors should insert");
}

/// Insert an actor (if new) and cast them on `movie_id`.
pub async fn add_actor(pool: &PgPool, id: i64, first: &str, last: &str, movie_id: i64) {
    sqlx::query("INSERT INTO actor (id, fname, lname) VALUES ($1, $2, $3) ON CONFLICT DO NOTHING")
        .bind(id)
        .bind(first)
        .bind(last)
        .execute(pool)
        .await
        .expect("actor should insert");
    sqlx::query("INSERT INTO casts (pid, mid, role) VALUES ($1, $2, 'role')")
        .bind(id)
        .bind(movie_id)
        .execute(pool)
        .await
        .expect("cast should insert");
}

pub async fn open_rentals_for_movie(pool: &PgPool, movie_id: i64) -> i64 {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM customer_rentals WHERE mid = $1 AND status = 'open'",
    )
    .bind(movie_id)
    .fetch_one(pool)
    .await
    .expect("count should succeed");
    count
}

pub async fn open_rentals_for_customer(pool: &PgPool, customer_id: i64) -> i64 {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM customer_rentals WHERE cid = $1 AND status = 'open'",
    )
    .bind(customer_id)
    .fetch_one(pool)
    .await
    .expect("count should succeed");
    count
}

pub async fn total_rental_rows(pool: &PgPool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customer_rentals")
        .fetch_one(pool)
        .await
        .expect("count should succeed");
    count
}

pub async fn plan_of(pool: &PgPool, customer_id: i64) -> i64 {
    let (pid,): (i64,) = sqlx::query_as("SELECT pid FROM has_plan WHERE cid = $1")
        .bind(customer_id)
        .fetch_one(pool)
        .await
        .expect("assignment should exist");
    pid
}

pub async fn plan_rows(pool: &PgPool, customer_id: i64) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM has_plan WHERE cid = $1")
        .bind(customer_id)
        .fetch_one(pool)
        .await
        .expect("count should succeed");
    count
}

/// Renter of `movie_id` as the ledger sees it.
pub async fn renter_of(pool: &PgPool, movie_id: i64) -> Option<i64> {
    let mut conn = pool.acquire().await.expect("connection");
    videostore_db::repositories::RentalRepo::renter_of(&mut conn, movie_id)
        .await
        .expect("renter lookup should succeed")
}
