//! Handlers for the `/cards` resource.
//!
//! Every handler is scoped to the requesting [`Owner`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use giftigo_core::card::NewGiftCard;
use giftigo_core::logo::resolve_brand_identity;
use giftigo_core::types::DbId;
use giftigo_core::view_model::{build_card_detail, build_card_list, CardDetail, CardListView};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::owner::Owner;
use crate::query::ListCardsParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Add-card form body. `search_logo` asks the server to look up a logo
/// when none was supplied.
#[derive(Debug, Deserialize)]
pub struct CreateCardRequest {
    #[serde(flatten)]
    pub card: NewGiftCard,
    #[serde(default)]
    pub search_logo: bool,
}

#[derive(Debug, Deserialize)]
pub struct FavoriteRequest {
    pub is_favorite: bool,
}

/// GET /api/v1/cards?view=&q=
pub async fn list(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Query(params): Query<ListCardsParams>,
) -> AppResult<Json<DataResponse<CardListView>>> {
    let now = Utc::now();
    let cards = state.store.list_cards(owner, params.view, now).await?;
    let view = build_card_list(&cards, params.view, params.q.as_deref().unwrap_or(""), now);
    Ok(Json(DataResponse { data: view }))
}

/// POST /api/v1/cards
///
/// Validation runs before the store is touched. A logo search, when asked
/// for, is best-effort: its failure still creates the card.
pub async fn create(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Json(input): Json<CreateCardRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CardDetail>>)> {
    let mut draft = input.card.into_draft(owner)?;

    if input.search_logo && draft.brand_logo_url.is_none() {
        let identity = resolve_brand_identity(state.logo.as_ref(), &draft.brand_name).await;
        tracing::debug!(brand = %draft.brand_name, outcome = ?identity.outcome, "Logo search for new card");
        draft.brand_logo_url = identity.logo_url;
    }

    let now = Utc::now();
    let card = state.store.create_card(draft, now).await?;
    tracing::info!(card_id = card.id, %owner, brand = %card.brand_name, "Gift card added");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: build_card_detail(card, now),
        }),
    ))
}

/// GET /api/v1/cards/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CardDetail>>> {
    let card = state.store.get_card(owner, id).await?;
    Ok(Json(DataResponse {
        data: build_card_detail(card, Utc::now()),
    }))
}

/// PUT /api/v1/cards/{id}/favorite
pub async fn set_favorite(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<DbId>,
    Json(input): Json<FavoriteRequest>,
) -> AppResult<Json<DataResponse<CardDetail>>> {
    let card = state.store.set_favorite(owner, id, input.is_favorite).await?;
    Ok(Json(DataResponse {
        data: build_card_detail(card, Utc::now()),
    }))
}

/// POST /api/v1/cards/{id}/use
///
/// One-way. A second call is a 409 and leaves `used_at` as it was.
pub async fn mark_used(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CardDetail>>> {
    let now = Utc::now();
    let card = state.store.mark_used(owner, id, now).await?;
    tracing::info!(card_id = id, %owner, "Gift card marked as used");
    Ok(Json(DataResponse {
        data: build_card_detail(card, now),
    }))
}
