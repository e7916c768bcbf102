use sea_orm::DbErr;
use thiserror::Error;

use crate::forms::FormErrors;

/// Failure of a record lifecycle operation.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Rejected before touching storage.
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(FormErrors),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// The write was rolled back.
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}
