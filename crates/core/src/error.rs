use crate::types::DbId;

/// Failures that are errors rather than rollbacks.
///
/// Invalid ids and broken rental rules never surface here; they end the
/// transaction with a [`crate::rental::RollbackReason`] instead.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("No {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Bad configuration or caller input.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Transaction state machine misuse.
    #[error("Internal error: {0}")]
    Internal(String),
}
