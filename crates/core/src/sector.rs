//! Merchant sectors a card can be filed under.
//!
//! The set is fixed; the add-card form offers exactly these options and the
//! analytics histograms are keyed by them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Fixed enumeration of card sectors. Serialized as the display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sector {
    #[serde(rename = "Food & Dining")]
    FoodDining,
    #[serde(rename = "Fashion & Clothing")]
    FashionClothing,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Sports & Fitness")]
    SportsFitness,
    #[serde(rename = "Technology")]
    Technology,
    #[serde(rename = "Travel")]
    Travel,
    #[serde(rename = "Health & Beauty")]
    HealthBeauty,
    #[serde(rename = "Home & Garden")]
    HomeGarden,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Other")]
    Other,
}

impl Sector {
    /// All sectors in form display order.
    pub const ALL: [Sector; 10] = [
        Sector::FoodDining,
        Sector::FashionClothing,
        Sector::Entertainment,
        Sector::SportsFitness,
        Sector::Technology,
        Sector::Travel,
        Sector::HealthBeauty,
        Sector::HomeGarden,
        Sector::Education,
        Sector::Other,
    ];

    /// Human-readable label, also used as the stored column value.
    pub fn label(self) -> &'static str {
        match self {
            Sector::FoodDining => "Food & Dining",
            Sector::FashionClothing => "Fashion & Clothing",
            Sector::Entertainment => "Entertainment",
            Sector::SportsFitness => "Sports & Fitness",
            Sector::Technology => "Technology",
            Sector::Travel => "Travel",
            Sector::HealthBeauty => "Health & Beauty",
            Sector::HomeGarden => "Home & Garden",
            Sector::Education => "Education",
            Sector::Other => "Other",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Sector {
    type Err = CoreError;

    /// Parse a sector label. Matching is case-insensitive and ignores
    /// surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.is_empty() {
            return Err(CoreError::Validation("Sector is required".to_string()));
        }
        Sector::ALL
            .into_iter()
            .find(|sector| sector.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::Validation(format!("Unknown sector: {wanted}")))
    }
}
