//! Record store port.
//!
//! Every operation is scoped by the owning user, passed explicitly. A card
//! that exists but belongs to someone else is reported as not found.
//! Backend failures surface as [`CoreError::Unavailable`].

pub mod memory;

use async_trait::async_trait;

use crate::card::{CardDraft, GiftCard};
use crate::error::CoreError;
use crate::types::{DbId, OwnerId, Timestamp};
use crate::view_model::ViewFilter;

pub use memory::MemoryCardStore;

/// Entity name used in not-found errors.
pub const GIFT_CARD_ENTITY: &str = "GiftCard";

/// Persistence operations for gift cards.
#[async_trait]
pub trait CardStore: Send + Sync {
    /// Cards for `owner` matching `filter`, newest first. Used cards are
    /// included; hiding them is a view concern. `now` anchors the
    /// expiring-soon window.
    async fn list_cards(
        &self,
        owner: OwnerId,
        filter: ViewFilter,
        now: Timestamp,
    ) -> Result<Vec<GiftCard>, CoreError>;

    /// A single card owned by `owner`.
    async fn get_card(&self, owner: OwnerId, id: DbId) -> Result<GiftCard, CoreError>;

    /// Persist a validated draft, stamped `created_at = now`. The store
    /// assigns `id`.
    async fn create_card(&self, draft: CardDraft, now: Timestamp) -> Result<GiftCard, CoreError>;

    /// Set `is_favorite`, returning the updated card.
    async fn set_favorite(
        &self,
        owner: OwnerId,
        id: DbId,
        is_favorite: bool,
    ) -> Result<GiftCard, CoreError>;

    /// One-way transition to used. Fails with `NotFound` for a missing card
    /// and `Conflict` for one already used, leaving it untouched.
    async fn mark_used(
        &self,
        owner: OwnerId,
        id: DbId,
        now: Timestamp,
    ) -> Result<GiftCard, CoreError>;

    /// Cheap reachability check.
    async fn health_check(&self) -> Result<(), CoreError>;
}

pub(crate) fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: GIFT_CARD_ENTITY,
        id,
    }
}
