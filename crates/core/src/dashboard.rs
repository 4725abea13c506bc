//! Client-side dashboard session.
//!
//! Holds one owner's view state: the active filter and search text, the
//! last list the store confirmed, and a queue of non-blocking notices.
//! Every mutation re-syncs from the store afterwards. A failed favorite
//! toggle is rolled back to the list as it was before the toggle.

use std::sync::Arc;

use serde::Serialize;

use crate::analytics::{compute_analytics, CardAnalytics};
use crate::card::{GiftCard, NewGiftCard};
use crate::error::CoreError;
use crate::logo::{resolve_brand_identity, BrandIdentity, LogoLookup, LogoOutcome};
use crate::optimistic::{MutationState, OptimisticUpdate};
use crate::store::{self, CardStore};
use crate::types::{DbId, OwnerId, Timestamp};
use crate::view_model::{build_card_list, CardListView, ViewFilter};

// ---------------------------------------------------------------------------
// Notices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A dismissible, non-blocking notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

pub struct DashboardSession {
    store: Arc<dyn CardStore>,
    owner: OwnerId,
    filter: ViewFilter,
    search: String,
    cards: Vec<GiftCard>,
    notices: Vec<Notice>,
}

impl DashboardSession {
    /// Start an empty session. Call [`refresh`](Self::refresh) to load cards.
    pub fn new(store: Arc<dyn CardStore>, owner: OwnerId) -> Self {
        Self {
            store,
            owner,
            filter: ViewFilter::All,
            search: String::new(),
            cards: Vec::new(),
            notices: Vec::new(),
        }
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn filter(&self) -> ViewFilter {
        self.filter
    }

    /// Last confirmed card list for the active filter.
    pub fn cards(&self) -> &[GiftCard] {
        &self.cards
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drain pending notices, e.g. after displaying them.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Grid view of the current snapshot.
    pub fn view(&self, now: Timestamp) -> CardListView {
        build_card_list(&self.cards, self.filter, &self.search, now)
    }

    /// Switch filter and reload.
    pub async fn set_filter(&mut self, filter: ViewFilter, now: Timestamp) -> Result<(), CoreError> {
        self.filter = filter;
        self.refresh(now).await
    }

    /// Reload the list for the active filter. On failure the previous list
    /// is kept and an error notice is queued.
    pub async fn refresh(&mut self, now: Timestamp) -> Result<(), CoreError> {
        match self.store.list_cards(self.owner, self.filter, now).await {
            Ok(cards) => {
                self.cards = cards;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(owner = %self.owner, error = %e, "Failed to fetch cards");
                self.notify(NoticeLevel::Error, "Failed to load your cards");
                Err(e)
            }
        }
    }

    /// Validate and create a card, then reload. Validation errors are
    /// returned without a notice so the form can show them inline.
    pub async fn add_card(&mut self, input: NewGiftCard, now: Timestamp) -> Result<GiftCard, CoreError> {
        let draft = input.into_draft(self.owner)?;
        match self.store.create_card(draft, now).await {
            Ok(card) => {
                self.notify(NoticeLevel::Success, "Gift card added successfully!");
                self.resync(now).await;
                Ok(card)
            }
            Err(e) => {
                self.notify(NoticeLevel::Error, "Failed to add gift card");
                Err(e)
            }
        }
    }

    /// Flip a card's favorite flag optimistically.
    ///
    /// The local list changes immediately. If the store rejects the change
    /// the list is restored and `RolledBack` is returned; otherwise the list
    /// is reloaded, so a card un-favorited in the favorites view drops out.
    pub async fn toggle_favorite(&mut self, id: DbId, now: Timestamp) -> Result<MutationState, CoreError> {
        let index = self
            .cards
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| store::not_found(id))?;
        let wanted = !self.cards[index].is_favorite;

        let update = OptimisticUpdate::apply(&mut self.cards, |cards| {
            cards[index].is_favorite = wanted;
        });

        let outcome = self.store.set_favorite(self.owner, id, wanted).await;
        let state = update.settle(&mut self.cards, &outcome);

        match outcome {
            Ok(confirmed) => {
                if let Some(slot) = self.cards.iter_mut().find(|c| c.id == id) {
                    *slot = confirmed;
                }
                self.resync(now).await;
            }
            Err(e) => {
                tracing::warn!(card_id = id, error = %e, "Favorite update failed, rolled back");
                self.notify(NoticeLevel::Error, "Failed to update favorite");
            }
        }
        Ok(state)
    }

    /// Mark a card used and reload, which drops it from the grid.
    pub async fn mark_used(&mut self, id: DbId, now: Timestamp) -> Result<GiftCard, CoreError> {
        match self.store.mark_used(self.owner, id, now).await {
            Ok(card) => {
                self.notify(NoticeLevel::Success, "Card marked as used!");
                self.resync(now).await;
                Ok(card)
            }
            Err(e) => {
                self.notify(NoticeLevel::Error, "Failed to mark card as used");
                Err(e)
            }
        }
    }

    /// Analytics over the owner's full collection, fetched fresh.
    pub async fn analytics(&mut self, now: Timestamp) -> Result<CardAnalytics, CoreError> {
        match self.store.list_cards(self.owner, ViewFilter::All, now).await {
            Ok(cards) => Ok(compute_analytics(&cards, now)),
            Err(e) => {
                self.notify(NoticeLevel::Error, "Failed to load analytics");
                Err(e)
            }
        }
    }

    /// Manual logo search from the add-card form.
    pub async fn search_brand_logo(&mut self, lookup: &dyn LogoLookup, brand_name: &str) -> BrandIdentity {
        let identity = resolve_brand_identity(lookup, brand_name).await;
        match identity.outcome {
            LogoOutcome::Found => self.notify(NoticeLevel::Success, "Brand logo found!"),
            LogoOutcome::NotFound => self.notify(NoticeLevel::Info, "No logo found for this brand"),
            LogoOutcome::Failed => self.notify(NoticeLevel::Error, "Failed to search brand logo"),
            LogoOutcome::Skipped => {}
        }
        identity
    }

    /// Reload after a successful mutation. The mutation already happened,
    /// so a failed reload is left to the notice queued by `refresh`.
    async fn resync(&mut self, now: Timestamp) {
        if self.refresh(now).await.is_err() {
            tracing::debug!(owner = %self.owner, "Keeping stale list after mutation");
        }
    }

    fn notify(&mut self, level: NoticeLevel, message: &str) {
        self.notices.push(Notice::new(level, message));
    }
}
