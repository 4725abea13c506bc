//! Placeholder cards shown to users whose collection is empty.
//!
//! These are display-only. They have no id, are never written to the store,
//! and never reach analytics.

use crate::sector::Sector;

/// A non-persisted onboarding card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleCard {
    pub key: &'static str,
    pub offer_name: &'static str,
    pub brand_name: &'static str,
    pub sector: Sector,
    pub brand_color: &'static str,
}

pub const SAMPLE_CARDS: &[SampleCard] = &[
    SampleCard {
        key: "sample-1",
        offer_name: "Rewards • Perks",
        brand_name: "Starbucks",
        sector: Sector::FoodDining,
        brand_color: "hsl(155, 59%, 27%)",
    },
    SampleCard {
        key: "sample-2",
        offer_name: "Fashion • Gift",
        brand_name: "American Eagle",
        sector: Sector::FashionClothing,
        brand_color: "hsl(219, 100%, 66%)",
    },
    SampleCard {
        key: "sample-3",
        offer_name: "Music • Gift",
        brand_name: "Spotify Premium",
        sector: Sector::Entertainment,
        brand_color: "hsl(141, 73%, 42%)",
    },
    SampleCard {
        key: "sample-4",
        offer_name: "Sport • Gift",
        brand_name: "Nike Member",
        sector: Sector::SportsFitness,
        brand_color: "hsl(0, 0%, 0%)",
    },
];
