pub mod games;
pub mod health;
pub mod tags;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /games                 list, create
/// /games/{id}            get, update, delete
/// /genres                reference list
/// /platforms             reference list
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/games", games::router())
        .merge(tags::router())
}
