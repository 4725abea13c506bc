//! In-process card store.
//!
//! Backs local runs without a database and the test suites. Availability
//! can be switched off to exercise the transient-failure paths.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{not_found, CardStore};
use crate::card::{CardDraft, GiftCard};
use crate::error::CoreError;
use crate::expiry;
use crate::types::{DbId, OwnerId, Timestamp};
use crate::view_model::ViewFilter;

#[derive(Default)]
struct Table {
    next_id: DbId,
    cards: Vec<GiftCard>,
}

/// A `RwLock`-guarded table of cards.
pub struct MemoryCardStore {
    table: RwLock<Table>,
    available: AtomicBool,
}

impl Default for MemoryCardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCardStore {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                next_id: 1,
                cards: Vec::new(),
            }),
            available: AtomicBool::new(true),
        }
    }

    /// While unavailable, every operation fails with
    /// [`CoreError::Unavailable`] and nothing is mutated.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Insert a fully-formed record as-is, e.g. to seed historical data.
    /// Advances the id sequence past `card.id`.
    pub async fn insert(&self, card: GiftCard) {
        let mut table = self.table.write().await;
        table.next_id = table.next_id.max(card.id + 1);
        table.cards.push(card);
    }

    fn ensure_available(&self) -> Result<(), CoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(CoreError::Unavailable(
                "In-memory store is offline".to_string(),
            ))
        }
    }
}

fn owned_mut(cards: &mut [GiftCard], owner: OwnerId, id: DbId) -> Result<&mut GiftCard, CoreError> {
    cards
        .iter_mut()
        .find(|c| c.id == id && c.owner_id == owner)
        .ok_or_else(|| not_found(id))
}

#[async_trait]
impl CardStore for MemoryCardStore {
    async fn list_cards(
        &self,
        owner: OwnerId,
        filter: ViewFilter,
        now: Timestamp,
    ) -> Result<Vec<GiftCard>, CoreError> {
        self.ensure_available()?;
        let table = self.table.read().await;
        let mut cards: Vec<GiftCard> = table
            .cards
            .iter()
            .filter(|c| c.owner_id == owner)
            .filter(|c| match filter {
                ViewFilter::All => true,
                ViewFilter::Favorites => c.is_favorite,
                ViewFilter::ExpiringSoon => expiry::is_expiring_soon(c.expires_at, now),
            })
            .cloned()
            .collect();
        cards.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        tracing::debug!(%owner, ?filter, count = cards.len(), "Listed cards from memory store");
        Ok(cards)
    }

    async fn get_card(&self, owner: OwnerId, id: DbId) -> Result<GiftCard, CoreError> {
        self.ensure_available()?;
        let table = self.table.read().await;
        table
            .cards
            .iter()
            .find(|c| c.id == id && c.owner_id == owner)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn create_card(&self, draft: CardDraft, now: Timestamp) -> Result<GiftCard, CoreError> {
        self.ensure_available()?;
        let mut table = self.table.write().await;
        let id = table.next_id;
        table.next_id += 1;
        let card = GiftCard::from_draft(id, draft, now);
        table.cards.push(card.clone());
        tracing::debug!(card_id = id, owner = %card.owner_id, "Created card in memory store");
        Ok(card)
    }

    async fn set_favorite(
        &self,
        owner: OwnerId,
        id: DbId,
        is_favorite: bool,
    ) -> Result<GiftCard, CoreError> {
        self.ensure_available()?;
        let mut table = self.table.write().await;
        let card = owned_mut(&mut table.cards, owner, id)?;
        card.is_favorite = is_favorite;
        Ok(card.clone())
    }

    async fn mark_used(
        &self,
        owner: OwnerId,
        id: DbId,
        now: Timestamp,
    ) -> Result<GiftCard, CoreError> {
        self.ensure_available()?;
        let mut table = self.table.write().await;
        let card = owned_mut(&mut table.cards, owner, id)?;
        card.mark_used(now)?;
        Ok(card.clone())
    }

    async fn health_check(&self) -> Result<(), CoreError> {
        self.ensure_available()
    }
}
