use axum::extract::State;
use axum::Json;
use chrono::Utc;
use giftigo_core::analytics::{compute_analytics, CardAnalytics};
use giftigo_core::view_model::ViewFilter;

use crate::error::AppResult;
use crate::middleware::owner::Owner;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/analytics
///
/// Computed over every stored card, used ones included.
pub async fn summary(
    State(state): State<AppState>,
    Owner(owner): Owner,
) -> AppResult<Json<DataResponse<CardAnalytics>>> {
    let now = Utc::now();
    let cards = state.store.list_cards(owner, ViewFilter::All, now).await?;
    Ok(Json(DataResponse {
        data: compute_analytics(&cards, now),
    }))
}
