//! Brand logo search over the Brandfetch HTTP API.
//!
//! [`BrandfetchClient`] performs the raw search and implements the core
//! [`LogoLookup`] port, so the rest of the system only sees a logo URL or
//! its absence.

use async_trait::async_trait;
use giftigo_core::logo::{LogoLookup, LogoLookupError};
use serde::Deserialize;

/// Default public API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.brandfetch.io";

/// HTTP client for the brand search endpoint.
pub struct BrandfetchClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

/// One entry of a `GET /v2/search/{name}` response. `name` and `domain`
/// identify the matched brand and are only logged.
#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub name: Option<String>,
    pub domain: Option<String>,
    pub icon: Option<String>,
}

/// Errors from the brand search API layer.
#[derive(Debug, thiserror::Error)]
pub enum BrandfetchError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The configured base URL cannot carry a path.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// The API returned a non-2xx status code.
    #[error("Brandfetch API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl BrandfetchClient {
    /// * `api_url` - Base URL, e.g. [`DEFAULT_API_URL`].
    /// * `api_key` - Sent as a bearer token.
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url, api_key)
    }

    /// Reuse an existing [`reqwest::Client`] for connection pooling.
    pub fn with_client(
        client: reqwest::Client,
        api_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Search brands by name. Results are in relevance order.
    pub async fn search(&self, brand_name: &str) -> Result<Vec<SearchResult>, BrandfetchError> {
        let url = search_url(&self.api_url, brand_name)?;
        tracing::debug!(%url, "Searching brand logo");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    /// Icon URL of the best match, if any.
    pub async fn find_icon(&self, brand_name: &str) -> Result<Option<String>, BrandfetchError> {
        let results = self.search(brand_name).await?;
        if let Some(top) = results.first() {
            tracing::debug!(
                query = brand_name,
                matched = top.name.as_deref().unwrap_or("<unnamed>"),
                domain = top.domain.as_deref().unwrap_or("<none>"),
                "Brand search top match"
            );
        }
        Ok(first_icon(results))
    }
}

#[async_trait]
impl LogoLookup for BrandfetchClient {
    async fn find_logo(&self, brand_name: &str) -> Result<Option<String>, LogoLookupError> {
        self.find_icon(brand_name)
            .await
            .map_err(|e| LogoLookupError::Failed(e.to_string()))
    }
}

/// `{api_url}/v2/search/{brand_name}` with the name percent-encoded as a
/// single path segment.
pub fn search_url(api_url: &str, brand_name: &str) -> Result<reqwest::Url, BrandfetchError> {
    let mut url =
        reqwest::Url::parse(api_url).map_err(|e| BrandfetchError::InvalidUrl(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| BrandfetchError::InvalidUrl(api_url.to_string()))?
        .pop_if_empty()
        .extend(["v2", "search", brand_name]);
    Ok(url)
}

/// Only the top result is considered; a top result without an icon means
/// no logo.
fn first_icon(results: Vec<SearchResult>) -> Option<String> {
    results
        .into_iter()
        .next()
        .and_then(|r| r.icon)
        .filter(|icon| !icon.trim().is_empty())
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, BrandfetchError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(BrandfetchError::ApiError {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}
