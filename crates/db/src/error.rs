//! Errors raised by the write and read paths of the store.

use gamespot_core::tags::TagKind;

/// Failure of a store operation.
///
/// `UnknownTag` is raised inside a write transaction when a desired tag name
/// has no reference row; the enclosing transaction is always rolled back.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Unknown {kind}: '{name}'")]
    UnknownTag { kind: TagKind, name: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
