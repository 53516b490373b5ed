//! Serializable transaction wrapper for the rental store.
//!
//! Tracks the [`TxState`] of one coordinator operation and guarantees the
//! transaction ends in exactly one of commit or rollback, including when a
//! step inside it fails.

use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use videostore_core::rental::{RollbackReason, TxOutcome, TxState};

use crate::error::{StoreError, StoreResult};

/// One open `SERIALIZABLE` transaction on the rental store.
pub struct SerializableTx {
    tx: Transaction<'static, Postgres>,
    state: TxState,
    operation: &'static str,
}

impl SerializableTx {
    /// Check out a connection and begin a serializable transaction on it.
    pub async fn begin(pool: &PgPool, operation: &'static str) -> StoreResult<Self> {
        let state = TxState::NotStarted.begin()?;
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;
        tracing::debug!(operation, "Began serializable transaction");
        Ok(Self {
            tx,
            state,
            operation,
        })
    }

    /// The transaction's connection, for repository calls.
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut self.tx
    }

    /// Commit when `verdict` is `Ok`, otherwise roll back.
    pub async fn resolve(self, verdict: Result<(), RollbackReason>) -> StoreResult<TxOutcome> {
        let operation = self.operation;
        match verdict {
            Ok(()) => {
                self.state.commit()?;
                self.tx.commit().await?;
                tracing::info!(operation, "Commit transaction");
                Ok(TxOutcome::Committed)
            }
            Err(reason) => {
                self.state.roll_back()?;
                self.tx.rollback().await?;
                tracing::info!(operation, %reason, "Rollback transaction");
                Ok(TxOutcome::RolledBack(reason))
            }
        }
    }

    /// Roll back after `err` interrupted the transaction and hand `err` back.
    ///
    /// A failed rollback is logged; `err` is what the caller gets back.
    pub async fn abort(self, err: StoreError) -> StoreError {
        let operation = self.operation;
        if let Err(rollback_err) = self.tx.rollback().await {
            tracing::warn!(operation, error = %rollback_err, "Rollback after failure did not complete");
        }
        tracing::warn!(operation, error = %err, "Transaction aborted");
        err
    }
}
