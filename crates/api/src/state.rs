use std::sync::Arc;

use giftigo_core::logo::LogoLookup;
use giftigo_core::store::CardStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Card persistence, PostgreSQL or in-memory.
    pub store: Arc<dyn CardStore>,
    /// Brand logo search provider.
    pub logo: Arc<dyn LogoLookup>,
    pub config: Arc<ServerConfig>,
}
