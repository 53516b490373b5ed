//! Repository for the `customers` table.

use sqlx::{PgConnection, PgPool};
use videostore_core::types::DbId;

/// Customer lookups. Customers are created out of band; nothing here writes.
pub struct CustomerRepo;

impl CustomerRepo {
    /// Exact-match credential lookup. Returns the customer id, or `None` when
    /// no customer has this login and password.
    ///
    /// Passwords are stored and compared in plaintext.
    pub async fn login(
        pool: &PgPool,
        login: &str,
        password: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let row: Option<(DbId,)> =
            sqlx::query_as("SELECT cid FROM customers WHERE login = $1 AND password = $2")
                .bind(login)
                .bind(password)
                .fetch_optional(pool)
                .await?;
        Ok(row.map(|r| r.0))
    }

    /// First and last name of a customer.
    pub async fn name(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<(String, String)>, sqlx::Error> {
        sqlx::query_as("SELECT fname, lname FROM customers WHERE cid = $1")
            .bind(id)
            .fetch_optional(conn)
            .await
    }
}
