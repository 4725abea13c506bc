//! Query parameter types for API handlers.

use giftigo_core::view_model::ViewFilter;
use serde::Deserialize;

/// `GET /cards?view=&q=`. Both are optional; `view` defaults to `all`.
#[derive(Debug, Default, Deserialize)]
pub struct ListCardsParams {
    #[serde(default)]
    pub view: ViewFilter,
    pub q: Option<String>,
}
