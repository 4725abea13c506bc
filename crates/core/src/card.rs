//! Gift card entity, creation input, and per-card presentation helpers.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::brand_color::resolve_brand_color;
use crate::error::CoreError;
use crate::expiry::{self, ExpiryStatus};
use crate::sector::Sector;
use crate::types::{DbId, OwnerId, Timestamp};

/// Number of trailing redeem-code characters shown in compact views.
pub const REDEEM_SUFFIX_LEN: usize = 4;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A stored gift card or coupon.
///
/// `used_at` is `Some` exactly when `is_used` is true. `brand_color` is
/// fixed at creation and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftCard {
    pub id: DbId,
    pub owner_id: OwnerId,
    pub offer_name: String,
    pub brand_name: String,
    pub sector: Sector,
    pub redeem_code: Option<String>,
    pub perks: Option<String>,
    pub description: Option<String>,
    pub value: f64,
    pub expires_at: Option<Timestamp>,
    pub brand_logo_url: Option<String>,
    pub brand_color: String,
    pub is_favorite: bool,
    pub is_used: bool,
    pub used_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl GiftCard {
    /// Materialize a draft as a fresh record.
    pub fn from_draft(id: DbId, draft: CardDraft, created_at: Timestamp) -> Self {
        Self {
            id,
            owner_id: draft.owner_id,
            offer_name: draft.offer_name,
            brand_name: draft.brand_name,
            sector: draft.sector,
            redeem_code: draft.redeem_code,
            perks: draft.perks,
            description: draft.description,
            value: draft.value,
            expires_at: draft.expires_at,
            brand_logo_url: draft.brand_logo_url,
            brand_color: draft.brand_color,
            is_favorite: false,
            is_used: false,
            used_at: None,
            created_at,
        }
    }

    /// One-way transition to used. Rejects a second call so the original
    /// `used_at` is never overwritten.
    pub fn mark_used(&mut self, now: Timestamp) -> Result<(), CoreError> {
        if self.is_used {
            return Err(already_used(self.id));
        }
        self.is_used = true;
        self.used_at = Some(now);
        Ok(())
    }

    /// Current expiry bucket, or `None` when the card never expires.
    pub fn expiry_status(&self, now: Timestamp) -> Option<ExpiryStatus> {
        self.expires_at.map(|at| expiry::classify(at, now))
    }

    pub fn is_expiring_soon(&self, now: Timestamp) -> bool {
        expiry::is_expiring_soon(self.expires_at, now)
    }

    pub fn redeem_code_suffix(&self) -> Option<String> {
        self.redeem_code.as_deref().map(redeem_code_suffix)
    }

    pub fn brand_mark(&self) -> BrandMark {
        BrandMark::new(self.brand_logo_url.as_deref(), &self.brand_name)
    }
}

/// Conflict error for a repeated mark-used.
pub fn already_used(id: DbId) -> CoreError {
    CoreError::Conflict(format!("Gift card {id} has already been marked as used"))
}

// ---------------------------------------------------------------------------
// Creation input
// ---------------------------------------------------------------------------

/// Add-card form submission.
///
/// Missing text fields deserialize as empty strings so they are reported
/// as validation errors rather than malformed JSON.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct NewGiftCard {
    pub offer_name: String,
    pub brand_name: String,
    pub sector: String,
    pub redeem_code: Option<String>,
    pub perks: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Value must not be negative"))]
    pub value: Option<f64>,
    /// A `YYYY-MM-DD` date from the form's date picker, or a full RFC 3339
    /// timestamp. A bare date means midnight UTC of that day.
    #[serde(deserialize_with = "deserialize_expiry")]
    pub expires_at: Option<Timestamp>,
    #[validate(url(message = "Brand logo URL must be a valid URL"))]
    pub brand_logo_url: Option<String>,
}

/// A validated card ready to be inserted, with its brand color resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct CardDraft {
    pub owner_id: OwnerId,
    pub offer_name: String,
    pub brand_name: String,
    pub sector: Sector,
    pub redeem_code: Option<String>,
    pub perks: Option<String>,
    pub description: Option<String>,
    pub value: f64,
    pub expires_at: Option<Timestamp>,
    pub brand_logo_url: Option<String>,
    pub brand_color: String,
}

impl NewGiftCard {
    /// Validate the submission and turn it into a [`CardDraft`] owned by
    /// `owner_id`. Blank optional fields become `None`; a missing value
    /// becomes 0.
    pub fn into_draft(mut self, owner_id: OwnerId) -> Result<CardDraft, CoreError> {
        // A blank logo field from the form is "no logo", not a bad URL.
        self.brand_logo_url = optional(self.brand_logo_url);
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;

        let offer_name = required(self.offer_name, "Offer name")?;
        let brand_name = required(self.brand_name, "Brand name")?;
        let sector: Sector = self.sector.parse()?;

        let value = self.value.unwrap_or(0.0);
        if !value.is_finite() {
            return Err(CoreError::Validation("Value must be a finite number".into()));
        }

        let brand_color = resolve_brand_color(&brand_name).to_string();

        Ok(CardDraft {
            owner_id,
            offer_name,
            brand_name,
            sector,
            redeem_code: optional(self.redeem_code),
            perks: optional(self.perks),
            description: optional(self.description),
            value,
            expires_at: self.expires_at,
            brand_logo_url: self.brand_logo_url,
            brand_color,
        })
    }
}

/// Parse an expiry as an RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
pub fn parse_expiry(raw: &str) -> Result<Timestamp, CoreError> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::default()).and_utc())
        .map_err(|_| {
            CoreError::Validation(format!(
                "Expiry date must be YYYY-MM-DD or an RFC 3339 timestamp, got '{raw}'"
            ))
        })
}

fn deserialize_expiry<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(parse_expiry)
        .transpose()
        .map_err(serde::de::Error::custom)
}

fn required(value: String, field: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Presentation helpers
// ---------------------------------------------------------------------------

/// Logo image when one is known, otherwise the brand's first letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BrandMark {
    Logo { url: String },
    Monogram { letter: String },
}

impl BrandMark {
    pub fn new(logo_url: Option<&str>, brand_name: &str) -> Self {
        match logo_url {
            Some(url) if !url.trim().is_empty() => BrandMark::Logo {
                url: url.to_string(),
            },
            _ => BrandMark::Monogram {
                letter: brand_name
                    .trim()
                    .chars()
                    .next()
                    .map(String::from)
                    .unwrap_or_default(),
            },
        }
    }
}

/// Last [`REDEEM_SUFFIX_LEN`] characters of a redeem code. Shorter codes
/// are returned whole.
pub fn redeem_code_suffix(code: &str) -> String {
    let chars: Vec<char> = code.chars().collect();
    chars[chars.len().saturating_sub(REDEEM_SUFFIX_LEN)..]
        .iter()
        .collect()
}

/// Format a rupee amount with Indian digit grouping, e.g. `₹12,34,567.5`.
///
/// At most two fraction digits are kept and trailing zeros are dropped.
pub fn format_inr(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let grouped = group_indian(int_part);
    let sign = if value < 0.0 { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}₹{grouped}")
    } else {
        format!("{sign}₹{grouped}.{frac}")
    }
}

/// Group digits as 3 then 2s from the right: `1234567` -> `12,34,567`.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

/// Long date used on the detail view, e.g. `January 5, 2024`.
pub fn format_long_date(at: Timestamp) -> String {
    at.format("%B %-d, %Y").to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
