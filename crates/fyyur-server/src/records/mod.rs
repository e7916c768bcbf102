//! Record lifecycle operations.
//!
//! Every operation validates first, then performs its whole write inside
//! one transaction: committed on success, rolled back on any failure. The
//! transaction owns its pooled connection, so the connection goes back to
//! the pool on every exit path.

use sea_orm::DatabaseTransaction;

use crate::error::RecordError;

mod artists;
mod genres;
mod shows;
mod venues;

pub use artists::{create_artist, update_artist};
pub use shows::create_show;
pub use venues::{create_venue, delete_venue, update_venue};

/// Commit on success, roll back on failure.
async fn finish<T>(
    txn: DatabaseTransaction,
    result: Result<T, RecordError>,
) -> Result<T, RecordError> {
    match result {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                tracing::error!(error = %rollback_err, "transaction rollback failed");
            }
            Err(err)
        }
    }
}
