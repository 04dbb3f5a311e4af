//! Game row model and the read view returned by the fan-out reader.

use gamespot_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `games` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Game {
    pub id: DbId,
    pub title: String,
    pub developer: String,
    pub price: f64,
    pub currency: String,
    pub release_year: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A game enriched with the names of its linked genres and platforms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameView {
    #[serde(flatten)]
    pub game: Game,
    pub genres: Vec<String>,
    pub platforms: Vec<String>,
}
