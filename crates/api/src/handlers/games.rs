//! Handlers for the `/games` resource.
//!
//! Writes validate the body before touching the store; every store failure
//! is reported with a generic per-operation message and logged in full.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use gamespot_core::catalog::{GameDraft, GamePayload};
use gamespot_core::error::CoreError;
use gamespot_core::types::DbId;
use gamespot_db::models::game::GameView;
use gamespot_db::repositories::GameRepo;

use crate::error::{AppError, AppResult, StoreResultExt};
use crate::response::{CreatedResponse, MessageResponse};
use crate::state::AppState;

/// Unwrap the JSON body and validate it into a [`GameDraft`].
fn parse_body(body: Result<Json<GamePayload>, JsonRejection>) -> AppResult<GameDraft> {
    let Json(payload) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    Ok(payload.into_draft()?)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/games
///
/// List all games ordered by title, each with its genre and platform names.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<GameView>>> {
    let games = GameRepo::list_with_tags(&state.pool)
        .await
        .with_context("Failed to load games.")?;
    Ok(Json(games))
}

/// GET /api/games/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<GameView>> {
    let game = GameRepo::find_with_tags(&state.pool, id)
        .await
        .with_context("Failed to load game.")?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Game", id }))?;
    Ok(Json(game))
}

/// POST /api/games
///
/// Create a game and link its genres and platforms atomically.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<GamePayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let draft = parse_body(body)?;
    let id = GameRepo::create(&state.pool, &draft)
        .await
        .with_context("Failed to create game.")?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// PUT /api/games/{id}
///
/// Replace a game's fields and both link sets. An unknown id is not reported
/// as an error.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Result<Json<GamePayload>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let draft = parse_body(body)?;
    // `false` (no such game) is already logged by the repository.
    GameRepo::update(&state.pool, id, &draft)
        .await
        .with_context("Failed to update game.")?;
    Ok(Json(MessageResponse {
        message: "Game updated.",
    }))
}

/// DELETE /api/games/{id}
///
/// Delete a game together with its links.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = GameRepo::delete(&state.pool, id)
        .await
        .with_context("Failed to delete game.")?;
    tracing::info!(game_id = id, deleted, "Game delete requested");
    Ok(Json(MessageResponse {
        message: "Game deleted.",
    }))
}
