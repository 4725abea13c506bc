//! Expiry urgency classification.
//!
//! Labels depend on the current moment, so they are computed at render or
//! query time and never stored. The 7-day window here is the same one the
//! expiring-soon view filter and the analytics counter use.

use std::fmt;

use chrono::Duration;
use serde::Serialize;

use crate::types::Timestamp;

/// Cards expiring within this many days count as "expiring soon".
pub const EXPIRING_SOON_DAYS: i64 = 7;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Urgency bucket for a card's expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExpiryStatus {
    Expired,
    Today,
    Tomorrow,
    InDays { days: i64 },
    OnDate { date: Timestamp },
}

impl ExpiryStatus {
    /// Bucket a whole-day difference. `expires_at` is only used for the
    /// far-future date label.
    pub fn from_days(days: i64, expires_at: Timestamp) -> Self {
        match days {
            d if d < 0 => ExpiryStatus::Expired,
            0 => ExpiryStatus::Today,
            1 => ExpiryStatus::Tomorrow,
            d if d <= EXPIRING_SOON_DAYS => ExpiryStatus::InDays { days: d },
            _ => ExpiryStatus::OnDate { date: expires_at },
        }
    }

    /// Human-readable label shown on cards.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpiryStatus::Expired => f.write_str("Expired"),
            ExpiryStatus::Today => f.write_str("Expires today"),
            ExpiryStatus::Tomorrow => f.write_str("Expires tomorrow"),
            ExpiryStatus::InDays { days } => write!(f, "Expires in {days} days"),
            ExpiryStatus::OnDate { date } => write!(f, "Expires {}", date.format("%b %-d, %Y")),
        }
    }
}

/// Whole days from `now` until `expires_at`, rounded up.
///
/// Anything later today counts as 0, anything earlier than a full day ago
/// is negative.
pub fn days_until(expires_at: Timestamp, now: Timestamp) -> i64 {
    let millis = (expires_at - now).num_milliseconds();
    let whole = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) > 0 {
        whole + 1
    } else {
        whole
    }
}

/// Classify an expiry timestamp relative to `now`.
pub fn classify(expires_at: Timestamp, now: Timestamp) -> ExpiryStatus {
    ExpiryStatus::from_days(days_until(expires_at, now), expires_at)
}

/// Upper bound (inclusive) for the expiring-soon window.
pub fn expiring_soon_cutoff(now: Timestamp) -> Timestamp {
    now + Duration::days(EXPIRING_SOON_DAYS)
}

/// Whether an optional expiry falls in the expiring-soon window.
///
/// There is no lower bound: already expired cards are included. Cards
/// without an expiry never are.
pub fn is_expiring_soon(expires_at: Option<Timestamp>, now: Timestamp) -> bool {
    expires_at.is_some_and(|at| at <= expiring_soon_cutoff(now))
}
