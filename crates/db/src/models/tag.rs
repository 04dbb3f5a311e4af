//! Tag reference rows and link rows.

use gamespot_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `genres` or `platforms` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
}

/// A link row joined to its tag name: one membership of a game in a tag set.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct TagLink {
    pub game_id: DbId,
    pub name: String,
}
