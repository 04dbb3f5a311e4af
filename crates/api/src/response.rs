//! Response bodies shared by the write handlers.

use gamespot_core::types::DbId;
use serde::Serialize;

/// Body of `201 Created` responses: `{ "id": ... }`.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: DbId,
}

/// Body of successful update and delete responses: `{ "message": ... }`.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
