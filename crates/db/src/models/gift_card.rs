//! Gift card row model.

use giftigo_core::card::GiftCard;
use giftigo_core::error::CoreError;
use giftigo_core::sector::Sector;
use giftigo_core::types::{DbId, OwnerId, Timestamp};
use sqlx::FromRow;

/// A row from the `gift_cards` table. `sector` is stored as its display
/// label, e.g. `Food & Dining`.
#[derive(Debug, Clone, FromRow)]
pub struct GiftCardRow {
    pub id: DbId,
    pub owner_id: OwnerId,
    pub offer_name: String,
    pub brand_name: String,
    pub sector: String,
    pub redeem_code: Option<String>,
    pub perks: Option<String>,
    pub description: Option<String>,
    pub value: f64,
    pub expires_at: Option<Timestamp>,
    pub brand_logo_url: Option<String>,
    pub brand_color: String,
    pub is_favorite: bool,
    pub is_used: bool,
    pub used_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl TryFrom<GiftCardRow> for GiftCard {
    type Error = CoreError;

    fn try_from(row: GiftCardRow) -> Result<Self, Self::Error> {
        let sector: Sector = row
            .sector
            .parse()
            .map_err(|_| CoreError::Internal(format!("Unknown sector stored for card {}: {}", row.id, row.sector)))?;

        Ok(GiftCard {
            id: row.id,
            owner_id: row.owner_id,
            offer_name: row.offer_name,
            brand_name: row.brand_name,
            sector,
            redeem_code: row.redeem_code,
            perks: row.perks,
            description: row.description,
            value: row.value,
            expires_at: row.expires_at,
            brand_logo_url: row.brand_logo_url,
            brand_color: row.brand_color,
            is_favorite: row.is_favorite,
            is_used: row.is_used,
            used_at: row.used_at,
            created_at: row.created_at,
        })
    }
}
