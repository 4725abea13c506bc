//! Derived dashboard and detail views.
//!
//! Takes the cards fetched for the active view filter and produces what the
//! grid renders: used cards dropped, search applied, and sample cards
//! substituted for an empty collection. Nothing here is cached; callers
//! rebuild the view whenever the snapshot or the clock changes.

use serde::{Deserialize, Serialize};

use crate::card::{format_inr, format_long_date, BrandMark, GiftCard};
use crate::samples::{SampleCard, SAMPLE_CARDS};
use crate::sector::Sector;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// View filter
// ---------------------------------------------------------------------------

/// Which subset of the owner's cards a query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewFilter {
    #[default]
    All,
    Favorites,
    #[serde(alias = "expiring")]
    ExpiringSoon,
}

impl ViewFilter {
    pub fn heading(self) -> &'static str {
        match self {
            ViewFilter::All => "All Cards",
            ViewFilter::Favorites => "Favorite Brands",
            ViewFilter::ExpiringSoon => "Expiring Soon",
        }
    }

    pub fn empty_message(self) -> &'static str {
        match self {
            ViewFilter::All => "No cards added yet",
            ViewFilter::Favorites => "No favorite cards yet",
            ViewFilter::ExpiringSoon => "No cards expiring soon",
        }
    }
}

/// Shown when cards exist but none match the search text.
pub const NO_SEARCH_MATCHES: &str = "No cards match your search";

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Case-insensitive substring match against brand, offer, and sector.
/// Blank queries match everything.
pub fn matches_search(card: &GiftCard, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    [
        card.brand_name.as_str(),
        card.offer_name.as_str(),
        card.sector.label(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// One card in the dashboard grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardTile {
    /// Stable render key: the record id, or the sample key.
    pub key: String,
    /// `None` for sample cards.
    pub id: Option<DbId>,
    pub offer_name: String,
    pub brand_name: String,
    pub sector: Sector,
    pub brand_color: String,
    pub brand_mark: BrandMark,
    pub value: f64,
    /// Only present for cards with a positive value.
    pub value_label: Option<String>,
    pub perks: Option<String>,
    pub redeem_code_suffix: Option<String>,
    pub expiry_label: Option<String>,
    pub is_favorite: bool,
    pub is_sample: bool,
    pub can_favorite: bool,
}

impl CardTile {
    fn from_card(card: &GiftCard, now: Timestamp) -> Self {
        Self {
            key: card.id.to_string(),
            id: Some(card.id),
            offer_name: card.offer_name.clone(),
            brand_name: card.brand_name.clone(),
            sector: card.sector,
            brand_color: card.brand_color.clone(),
            brand_mark: card.brand_mark(),
            value: card.value,
            value_label: value_label(card.value),
            perks: card.perks.clone(),
            redeem_code_suffix: card.redeem_code_suffix(),
            expiry_label: card.expiry_status(now).map(|s| s.label()),
            is_favorite: card.is_favorite,
            is_sample: false,
            can_favorite: true,
        }
    }

    fn from_sample(sample: &SampleCard) -> Self {
        Self {
            key: sample.key.to_string(),
            id: None,
            offer_name: sample.offer_name.to_string(),
            brand_name: sample.brand_name.to_string(),
            sector: sample.sector,
            brand_color: sample.brand_color.to_string(),
            brand_mark: BrandMark::new(None, sample.brand_name),
            value: 0.0,
            value_label: None,
            perks: None,
            redeem_code_suffix: None,
            expiry_label: None,
            is_favorite: false,
            is_sample: true,
            can_favorite: false,
        }
    }
}

/// Everything the dashboard grid needs for one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardListView {
    pub filter: ViewFilter,
    pub heading: &'static str,
    /// True when sample cards are being shown in place of an empty collection.
    pub is_onboarding: bool,
    pub cards: Vec<CardTile>,
    pub empty_message: Option<&'static str>,
}

/// Build the grid view for `cards`, the set fetched for `filter`.
pub fn build_card_list(
    cards: &[GiftCard],
    filter: ViewFilter,
    search: &str,
    now: Timestamp,
) -> CardListView {
    if filter == ViewFilter::All && cards.is_empty() {
        return CardListView {
            filter,
            heading: filter.heading(),
            is_onboarding: true,
            cards: SAMPLE_CARDS.iter().map(CardTile::from_sample).collect(),
            empty_message: None,
        };
    }

    let tiles: Vec<CardTile> = cards
        .iter()
        .filter(|card| !card.is_used)
        .filter(|card| matches_search(card, search))
        .map(|card| CardTile::from_card(card, now))
        .collect();

    let empty_message = if !tiles.is_empty() {
        None
    } else if !search.trim().is_empty() && cards.iter().any(|c| !c.is_used) {
        Some(NO_SEARCH_MATCHES)
    } else {
        Some(filter.empty_message())
    };

    CardListView {
        filter,
        heading: filter.heading(),
        is_onboarding: false,
        cards: tiles,
        empty_message,
    }
}

fn value_label(value: f64) -> Option<String> {
    (value > 0.0).then(|| format_inr(value))
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

/// Card detail view: the full record plus derived labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardDetail {
    #[serde(flatten)]
    pub card: GiftCard,
    pub brand_mark: BrandMark,
    pub value_label: Option<String>,
    pub expiry_label: Option<String>,
    pub expiry_date_label: Option<String>,
    pub used_on_label: Option<String>,
    pub can_mark_used: bool,
}

pub fn build_card_detail(card: GiftCard, now: Timestamp) -> CardDetail {
    CardDetail {
        brand_mark: card.brand_mark(),
        value_label: value_label(card.value),
        expiry_label: card.expiry_status(now).map(|s| s.label()),
        expiry_date_label: card.expires_at.map(format_long_date),
        used_on_label: card.used_at.filter(|_| card.is_used).map(format_long_date),
        can_mark_used: !card.is_used,
        card,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
