use videostore_core::error::CoreError;

/// Error type for every store entry point.
///
/// Invalid references and broken invariants are not errors: they surface as
/// `None`/`false` from the repos and as a rolled-back [`TxOutcome`]. What is
/// left is fatal to the operation.
///
/// [`TxOutcome`]: videostore_core::rental::TxOutcome
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A domain-level error from `videostore_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Connectivity, timeout or query failure from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Embedded schema migrations failed to apply.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Convenience type alias for store return values.
pub type StoreResult<T> = Result<T, StoreError>;

/// PostgreSQL `serialization_failure`.
const SQLSTATE_SERIALIZATION_FAILURE: &str = "40001";

impl StoreError {
    /// Whether the database aborted the transaction to preserve serializability.
    pub fn is_serialization_failure(&self) -> bool {
        match self {
            StoreError::Database(sqlx::Error::Database(db_err)) => {
                db_err.code().as_deref() == Some(SQLSTATE_SERIALIZATION_FAILURE)
            }
            _ => false,
        }
    }
}
