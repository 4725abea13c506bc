use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::cards;
use crate::state::AppState;

/// Routes mounted at `/cards`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// GET    /{id}              -> get_by_id
/// PUT    /{id}/favorite     -> set_favorite
/// POST   /{id}/use          -> mark_used
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cards::list).post(cards::create))
        .route("/{id}", get(cards::get_by_id))
        .route("/{id}/favorite", put(cards::set_favorite))
        .route("/{id}/use", post(cards::mark_used))
}
