//! Route definitions for games.

use axum::routing::get;
use axum::Router;

use crate::handlers::games;
use crate::state::AppState;

/// Routes mounted at `/games`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(games::list).post(games::create))
        .route(
            "/{id}",
            get(games::get_by_id)
                .put(games::update)
                .delete(games::delete),
        )
}
