use std::time::Duration;

use videostore_core::error::CoreError;

/// Smallest catalog pool that lets dependent-join search stream movies while
/// running its per-movie sub-queries.
const MIN_CONNECTIONS: u32 = 2;

/// Connection settings for the two databases, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Catalog (movies, directors, actors) connection URL.
    pub catalog_url: String,
    /// Rental store (customers, plans, rentals) connection URL.
    pub rental_url: String,
    /// Pool size per database (default: `5`).
    pub max_connections: u32,
    /// How long to wait for a pooled connection before failing (default: `10`).
    pub acquire_timeout: Duration,
    /// Apply the embedded migrations at startup (default: `false`).
    pub run_migrations: bool,
}

impl DbConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                  | Default |
    /// |--------------------------|---------|
    /// | `CATALOG_DATABASE_URL`   | --      |
    /// | `RENTAL_DATABASE_URL`    | --      |
    /// | `DB_MAX_CONNECTIONS`     | `5`     |
    /// | `DB_ACQUIRE_TIMEOUT_SECS`| `10`    |
    /// | `DB_RUN_MIGRATIONS`      | `false` |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| CoreError::Validation(format!("{key} must be set")))
        };

        let catalog_url = required("CATALOG_DATABASE_URL")?;
        let rental_url = required("RENTAL_DATABASE_URL")?;

        let max_connections: u32 = parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?;
        if max_connections < MIN_CONNECTIONS {
            return Err(CoreError::Validation(format!(
                "DB_MAX_CONNECTIONS must be at least {MIN_CONNECTIONS}, got {max_connections}"
            )));
        }

        let acquire_timeout_secs: u64 = parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 10)?;
        let run_migrations: bool = parse_or(&lookup, "DB_RUN_MIGRATIONS", false)?;

        Ok(Self {
            catalog_url,
            rental_url,
            max_connections,
            acquire_timeout: Duration::from_secs(acquire_timeout_secs),
            run_migrations,
        })
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, CoreError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| CoreError::Validation(format!("{key} is invalid ({raw}): {e}"))),
    }
}
