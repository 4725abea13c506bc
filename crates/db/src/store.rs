//! [`CardStore`] backed by PostgreSQL.

use async_trait::async_trait;
use giftigo_core::card::{already_used, CardDraft, GiftCard};
use giftigo_core::error::CoreError;
use giftigo_core::expiry;
use giftigo_core::store::{CardStore, GIFT_CARD_ENTITY};
use giftigo_core::types::{DbId, OwnerId, Timestamp};
use giftigo_core::view_model::ViewFilter;

use crate::models::gift_card::GiftCardRow;
use crate::repositories::{CardListFilter, GiftCardRepo};
use crate::DbPool;

#[derive(Clone)]
pub struct PgCardStore {
    pool: DbPool,
}

impl PgCardStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn unavailable(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Gift card query failed");
    CoreError::Unavailable(err.to_string())
}

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: GIFT_CARD_ENTITY,
        id,
    }
}

fn list_filter(filter: ViewFilter, now: Timestamp) -> CardListFilter {
    match filter {
        ViewFilter::All => CardListFilter::default(),
        ViewFilter::Favorites => CardListFilter {
            favorites_only: true,
            expiring_before: None,
        },
        ViewFilter::ExpiringSoon => CardListFilter {
            favorites_only: false,
            expiring_before: Some(expiry::expiring_soon_cutoff(now)),
        },
    }
}

fn into_card(row: GiftCardRow) -> Result<GiftCard, CoreError> {
    GiftCard::try_from(row)
}

#[async_trait]
impl CardStore for PgCardStore {
    async fn list_cards(
        &self,
        owner: OwnerId,
        filter: ViewFilter,
        now: Timestamp,
    ) -> Result<Vec<GiftCard>, CoreError> {
        let rows = GiftCardRepo::list_by_owner(&self.pool, owner, list_filter(filter, now))
            .await
            .map_err(unavailable)?;
        rows.into_iter().map(into_card).collect()
    }

    async fn get_card(&self, owner: OwnerId, id: DbId) -> Result<GiftCard, CoreError> {
        GiftCardRepo::find_by_id(&self.pool, owner, id)
            .await
            .map_err(unavailable)?
            .ok_or_else(|| not_found(id))
            .and_then(into_card)
    }

    async fn create_card(&self, draft: CardDraft, now: Timestamp) -> Result<GiftCard, CoreError> {
        let row = GiftCardRepo::create(&self.pool, &draft, now)
            .await
            .map_err(unavailable)?;
        tracing::info!(card_id = row.id, owner = %row.owner_id, "Gift card created");
        into_card(row)
    }

    async fn set_favorite(
        &self,
        owner: OwnerId,
        id: DbId,
        is_favorite: bool,
    ) -> Result<GiftCard, CoreError> {
        GiftCardRepo::set_favorite(&self.pool, owner, id, is_favorite)
            .await
            .map_err(unavailable)?
            .ok_or_else(|| not_found(id))
            .and_then(into_card)
    }

    async fn mark_used(
        &self,
        owner: OwnerId,
        id: DbId,
        now: Timestamp,
    ) -> Result<GiftCard, CoreError> {
        if let Some(row) = GiftCardRepo::mark_used(&self.pool, owner, id, now)
            .await
            .map_err(unavailable)?
        {
            tracing::info!(card_id = id, %owner, "Gift card marked as used");
            return into_card(row);
        }

        // Nothing updated: either the card is missing or it was already used.
        match GiftCardRepo::find_by_id(&self.pool, owner, id)
            .await
            .map_err(unavailable)?
        {
            Some(_) => Err(already_used(id)),
            None => Err(not_found(id)),
        }
    }

    async fn health_check(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool).await.map_err(unavailable)
    }
}
