//! Brand logo lookup port and best-effort brand identity resolution.
//!
//! Logo search is optional decoration. A failed or unconfigured lookup
//! never blocks card creation: the card still gets its resolved color, just
//! no logo.

use async_trait::async_trait;
use serde::Serialize;

use crate::brand_color::resolve_brand_color;

/// Errors from a logo lookup backend.
#[derive(Debug, thiserror::Error)]
pub enum LogoLookupError {
    /// No API key or endpoint has been configured.
    #[error("Logo lookup is not configured")]
    NotConfigured,

    /// The lookup was attempted and failed.
    #[error("Logo lookup failed: {0}")]
    Failed(String),
}

/// Finds a logo URL for a brand name.
#[async_trait]
pub trait LogoLookup: Send + Sync {
    /// `Ok(None)` means the search ran and found nothing.
    async fn find_logo(&self, brand_name: &str) -> Result<Option<String>, LogoLookupError>;
}

/// Lookup used when no provider is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledLogoLookup;

#[async_trait]
impl LogoLookup for DisabledLogoLookup {
    async fn find_logo(&self, _brand_name: &str) -> Result<Option<String>, LogoLookupError> {
        Err(LogoLookupError::NotConfigured)
    }
}

/// How a logo search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoOutcome {
    Found,
    NotFound,
    Failed,
    /// Blank brand name; no search was made.
    Skipped,
}

/// Logo and accent color for a brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandIdentity {
    pub logo_url: Option<String>,
    pub brand_color: String,
    pub outcome: LogoOutcome,
}

/// Search for a logo and resolve the brand color. Lookup failures are
/// logged and folded into [`LogoOutcome::Failed`].
pub async fn resolve_brand_identity(lookup: &dyn LogoLookup, brand_name: &str) -> BrandIdentity {
    let brand = brand_name.trim();
    let brand_color = resolve_brand_color(brand).to_string();

    if brand.is_empty() {
        return BrandIdentity {
            logo_url: None,
            brand_color,
            outcome: LogoOutcome::Skipped,
        };
    }

    let (logo_url, outcome) = match lookup.find_logo(brand).await {
        Ok(Some(url)) => (Some(url), LogoOutcome::Found),
        Ok(None) => (None, LogoOutcome::NotFound),
        Err(e) => {
            tracing::warn!(brand, error = %e, "Brand logo search failed");
            (None, LogoOutcome::Failed)
        }
    };

    BrandIdentity {
        logo_url,
        brand_color,
        outcome,
    }
}
