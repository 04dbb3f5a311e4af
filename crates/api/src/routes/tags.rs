use axum::routing::get;
use axum::Router;

use crate::handlers::tags;
use crate::state::AppState;

/// Reference list routes, mounted at the API root.
///
/// ```text
/// GET /genres     -> list_genres
/// GET /platforms  -> list_platforms
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/genres", get(tags::list_genres))
        .route("/platforms", get(tags::list_platforms))
}
