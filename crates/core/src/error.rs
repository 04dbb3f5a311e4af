use crate::types::DbId;

/// Domain errors raised before or outside the store.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Rejected input; the message is shown to the client as-is.
    #[error("Validation failed: {0}")]
    Validation(String),
}
