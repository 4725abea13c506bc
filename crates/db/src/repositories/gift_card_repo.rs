//! Repository for the `gift_cards` table.
//!
//! Every query is scoped by `owner_id`; a row owned by someone else is
//! indistinguishable from a missing one.

use giftigo_core::card::CardDraft;
use giftigo_core::types::{DbId, OwnerId, Timestamp};
use sqlx::PgPool;

use crate::models::gift_card::GiftCardRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, offer_name, brand_name, sector, redeem_code, perks, \
     description, value, expires_at, brand_logo_url, brand_color, is_favorite, is_used, \
     used_at, created_at";

/// Row filter for [`GiftCardRepo::list_by_owner`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CardListFilter {
    pub favorites_only: bool,
    /// Only cards with an expiry at or before this instant.
    pub expiring_before: Option<Timestamp>,
}

pub struct GiftCardRepo;

impl GiftCardRepo {
    /// Insert a new card created at `created_at`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CardDraft,
        created_at: Timestamp,
    ) -> Result<GiftCardRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO gift_cards
                (owner_id, offer_name, brand_name, sector, redeem_code, perks,
                 description, value, expires_at, brand_logo_url, brand_color, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GiftCardRow>(&query)
            .bind(input.owner_id)
            .bind(&input.offer_name)
            .bind(&input.brand_name)
            .bind(input.sector.label())
            .bind(&input.redeem_code)
            .bind(&input.perks)
            .bind(&input.description)
            .bind(input.value)
            .bind(input.expires_at)
            .bind(&input.brand_logo_url)
            .bind(&input.brand_color)
            .bind(created_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        owner_id: OwnerId,
        id: DbId,
    ) -> Result<Option<GiftCardRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM gift_cards WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, GiftCardRow>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List an owner's cards, newest first. Used cards are included.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: OwnerId,
        filter: CardListFilter,
    ) -> Result<Vec<GiftCardRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM gift_cards
             WHERE owner_id = $1
               AND ($2 = FALSE OR is_favorite)
               AND ($3::timestamptz IS NULL OR expires_at <= $3)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, GiftCardRow>(&query)
            .bind(owner_id)
            .bind(filter.favorites_only)
            .bind(filter.expiring_before)
            .fetch_all(pool)
            .await
    }

    /// Returns `None` if no such card exists for the owner.
    pub async fn set_favorite(
        pool: &PgPool,
        owner_id: OwnerId,
        id: DbId,
        is_favorite: bool,
    ) -> Result<Option<GiftCardRow>, sqlx::Error> {
        let query = format!(
            "UPDATE gift_cards SET is_favorite = $3
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GiftCardRow>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(is_favorite)
            .fetch_optional(pool)
            .await
    }

    /// Flip an unused card to used.
    ///
    /// Returns `None` when the card is missing or already used; the row is
    /// left untouched in both cases.
    pub async fn mark_used(
        pool: &PgPool,
        owner_id: OwnerId,
        id: DbId,
        used_at: Timestamp,
    ) -> Result<Option<GiftCardRow>, sqlx::Error> {
        let query = format!(
            "UPDATE gift_cards SET is_used = TRUE, used_at = $3
             WHERE id = $1 AND owner_id = $2 AND is_used = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GiftCardRow>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(used_at)
            .fetch_optional(pool)
            .await
    }
}
