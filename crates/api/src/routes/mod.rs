pub mod cards;
pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /sectors                      sector options (GET)
/// /cards                        list, create
/// /cards/{id}                   detail
/// /cards/{id}/favorite          set favorite (PUT)
/// /cards/{id}/use               mark used (POST)
/// /analytics                    collection summary (GET)
/// /brand-logo/search            logo search proxy (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/sectors", get(handlers::sectors::list))
        .nest("/cards", cards::router())
        .route("/analytics", get(handlers::analytics::summary))
        .route("/brand-logo/search", post(handlers::brand_logo::search))
}
