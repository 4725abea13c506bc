//! Brand logo search proxy.
//!
//! Keeps the provider's API key on the server. Request and response use
//! camelCase keys for compatibility with existing clients.

use axum::extract::State;
use axum::Json;
use giftigo_core::logo::LogoLookupError;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::owner::Owner;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoSearchRequest {
    #[serde(default)]
    pub brand_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoSearchResponse {
    /// `null` when nothing was found.
    pub logo_url: Option<String>,
}

/// POST /api/v1/brand-logo/search
pub async fn search(
    State(state): State<AppState>,
    Owner(_owner): Owner,
    Json(input): Json<LogoSearchRequest>,
) -> AppResult<Json<LogoSearchResponse>> {
    let brand = input
        .brand_name
        .as_deref()
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .ok_or_else(|| AppError::BadRequest("Brand name is required".into()))?;

    match state.logo.find_logo(brand).await {
        Ok(logo_url) => Ok(Json(LogoSearchResponse { logo_url })),
        Err(LogoLookupError::NotConfigured) => Err(AppError::InternalError {
            public: "API key not configured".into(),
            detail: "BRAND_LOGO_API_KEY is not set".into(),
        }),
        Err(e) => Err(AppError::InternalError {
            public: "Failed to search brand logo".into(),
            detail: e.to_string(),
        }),
    }
}
