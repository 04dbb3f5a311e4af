//! Handlers for the read-only tag reference lists.

use axum::extract::State;
use axum::Json;
use gamespot_core::tags::TagKind;
use gamespot_db::models::tag::Tag;
use gamespot_db::repositories::TagRepo;

use crate::error::{AppResult, StoreResultExt};
use crate::state::AppState;

/// GET /api/genres
pub async fn list_genres(State(state): State<AppState>) -> AppResult<Json<Vec<Tag>>> {
    let genres = TagRepo::list(&state.pool, TagKind::Genre)
        .await
        .with_context("Failed to load genres.")?;
    Ok(Json(genres))
}

/// GET /api/platforms
pub async fn list_platforms(State(state): State<AppState>) -> AppResult<Json<Vec<Tag>>> {
    let platforms = TagRepo::list(&state.pool, TagKind::Platform)
        .await
        .with_context("Failed to load platforms.")?;
    Ok(Json(platforms))
}
