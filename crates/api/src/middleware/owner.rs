//! Owner identity extractor.
//!
//! Authentication happens in front of this service; the authenticated
//! user's id arrives in the `x-owner-id` header as a UUID.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use giftigo_core::error::CoreError;
use giftigo_core::types::OwnerId;

use crate::error::AppError;

pub const OWNER_HEADER: &str = "x-owner-id";

/// The user on whose behalf the request is made.
///
/// ```ignore
/// async fn my_handler(Owner(owner): Owner) -> AppResult<Json<()>> {
///     tracing::info!(%owner, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Owner(pub OwnerId);

impl<S: Send + Sync> FromRequestParts<S> for Owner {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(OWNER_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(format!(
                    "Missing {OWNER_HEADER} header"
                )))
            })?;

        let owner = raw.trim().parse::<OwnerId>().map_err(|_| {
            AppError::Core(CoreError::Unauthorized(format!(
                "Invalid {OWNER_HEADER} header. Expected a UUID"
            )))
        })?;

        Ok(Owner(owner))
    }
}
