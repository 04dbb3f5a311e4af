//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods. Read
//! methods accept `&PgPool`; write steps that must share a transaction
//! accept the caller's `Transaction` instead of opening their own.

pub mod game_link_repo;
pub mod game_repo;
pub mod tag_repo;

pub use game_link_repo::GameLinkRepo;
pub use game_repo::GameRepo;
pub use tag_repo::TagRepo;

use sqlx::{Postgres, Transaction};

use crate::error::StoreError;

/// Commit `tx` if `outcome` succeeded, otherwise roll it back and return the
/// original error.
///
/// A failed rollback is only logged: the connection is discarded by the pool
/// and the database aborts the transaction on its side.
pub(crate) async fn finish_transaction<T>(
    tx: Transaction<'_, Postgres>,
    outcome: Result<T, StoreError>,
) -> Result<T, StoreError> {
    match outcome {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "Transaction rollback failed");
            }
            Err(err)
        }
    }
}
