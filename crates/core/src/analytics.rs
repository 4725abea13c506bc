//! Collection analytics.
//!
//! A single pass over every card the owner has (used ones included).
//! Sample cards never reach this module. Results are recomputed per request.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;

use crate::card::GiftCard;
use crate::expiry;
use crate::sector::Sector;
use crate::types::Timestamp;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Cards created in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    /// `YYYY-MM`, unique per bucket.
    pub month: String,
    /// Short month name, e.g. `Jan`.
    pub label: &'static str,
    pub count: u64,
}

/// Aggregate metrics for the analytics view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardAnalytics {
    pub total_cards: u64,
    pub total_value: f64,
    /// 0 for an empty collection.
    pub average_value: f64,
    pub expiring_soon: u64,
    pub used_count: u64,
    pub favorite_count: u64,
    pub sector_histogram: BTreeMap<Sector, u64>,
    pub value_by_sector: BTreeMap<Sector, f64>,
    /// Brand of the highest-value card; `None` when there are no cards.
    pub top_brand: Option<String>,
    /// Chronological.
    pub monthly_histogram: Vec<MonthBucket>,
}

#[derive(Default)]
struct Tally<'a> {
    total_cards: u64,
    total_value: f64,
    expiring_soon: u64,
    used_count: u64,
    favorite_count: u64,
    sector_histogram: BTreeMap<Sector, u64>,
    value_by_sector: BTreeMap<Sector, f64>,
    top: Option<(&'a str, f64)>,
    months: BTreeMap<(i32, u32), u64>,
}

/// Reduce a card collection to [`CardAnalytics`].
pub fn compute_analytics(cards: &[GiftCard], now: Timestamp) -> CardAnalytics {
    let cutoff = expiry::expiring_soon_cutoff(now);

    let tally = cards.iter().fold(Tally::default(), |mut t, card| {
        t.total_cards += 1;
        t.total_value += card.value;
        if card.expires_at.is_some_and(|at| at <= cutoff) {
            t.expiring_soon += 1;
        }
        if card.is_used {
            t.used_count += 1;
        }
        if card.is_favorite {
            t.favorite_count += 1;
        }
        *t.sector_histogram.entry(card.sector).or_insert(0) += 1;
        *t.value_by_sector.entry(card.sector).or_insert(0.0) += card.value;

        // Ties keep the first card.
        match t.top {
            Some((_, best)) if card.value <= best => {}
            _ => t.top = Some((card.brand_name.as_str(), card.value)),
        }

        let created = card.created_at;
        *t.months.entry((created.year(), created.month())).or_insert(0) += 1;
        t
    });

    let average_value = if tally.total_cards == 0 {
        0.0
    } else {
        tally.total_value / tally.total_cards as f64
    };

    let monthly_histogram = tally
        .months
        .into_iter()
        .map(|((year, month), count)| MonthBucket {
            month: format!("{year:04}-{month:02}"),
            label: MONTH_LABELS[(month - 1) as usize],
            count,
        })
        .collect();

    CardAnalytics {
        total_cards: tally.total_cards,
        total_value: tally.total_value,
        average_value,
        expiring_soon: tally.expiring_soon,
        used_count: tally.used_count,
        favorite_count: tally.favorite_count,
        sector_histogram: tally.sector_histogram,
        value_by_sector: tally.value_by_sector,
        top_brand: tally.top.map(|(brand, _)| brand.to_string()),
        monthly_histogram,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn card(brand: &str, value: f64, sector: Sector) -> GiftCard {
        GiftCard {
            id: 0,
            owner_id: uuid::Uuid::nil(),
            offer_name: "Offer".into(),
            brand_name: brand.into(),
            sector,
            redeem_code: None,
            perks: None,
            description: None,
            value,
            expires_at: None,
            brand_logo_url: None,
            brand_color: crate::brand_color::DEFAULT_BRAND_COLOR.into(),
            is_favorite: false,
            is_used: false,
            used_at: None,
            created_at: now(),
        }
    }

    #[test]
    fn empty_collection_has_zero_average_and_no_top_brand() {
        let a = compute_analytics(&[], now());
        assert_eq!(a.total_cards, 0);
        assert_eq!(a.total_value, 0.0);
        assert_eq!(a.average_value, 0.0);
        assert!(!a.average_value.is_nan());
        assert_eq!(a.top_brand, None);
        assert!(a.sector_histogram.is_empty());
        assert!(a.monthly_histogram.is_empty());
    }

    #[test]
    fn three_card_scenario() {
        let cards = [
            card("Dominos", 100.0, Sector::FoodDining),
            card("KFC", 50.0, Sector::FoodDining),
            card("Apple", 200.0, Sector::Technology),
        ];
        let a = compute_analytics(&cards, now());

        assert_eq!(a.total_cards, 3);
        assert_eq!(a.total_value, 350.0);
        assert!((a.average_value - 116.67).abs() < 0.01);
        assert_eq!(a.sector_histogram[&Sector::FoodDining], 2);
        assert_eq!(a.sector_histogram[&Sector::Technology], 1);
        assert_eq!(a.value_by_sector[&Sector::FoodDining], 150.0);
        assert_eq!(a.value_by_sector[&Sector::Technology], 200.0);
        assert_eq!(a.top_brand.as_deref(), Some("Apple"));
    }

    #[test]
    fn top_brand_ties_keep_first_encountered() {
        let cards = [
            card("First", 10.0, Sector::Other),
            card("Second", 10.0, Sector::Other),
        ];
        assert_eq!(
            compute_analytics(&cards, now()).top_brand.as_deref(),
            Some("First")
        );
    }

    #[test]
    fn zero_value_collection_still_has_top_brand() {
        let cards = [card("Gap", 0.0, Sector::FashionClothing)];
        assert_eq!(
            compute_analytics(&cards, now()).top_brand.as_deref(),
            Some("Gap")
        );
    }

    #[test]
    fn counts_include_used_and_favorites() {
        let mut used = card("Nike", 10.0, Sector::SportsFitness);
        used.mark_used(now()).unwrap();
        let mut fav = card("Zara", 20.0, Sector::FashionClothing);
        fav.is_favorite = true;
        let a = compute_analytics(&[used, fav], now());
        assert_eq!(a.total_cards, 2);
        assert_eq!(a.used_count, 1);
        assert_eq!(a.favorite_count, 1);
    }

    #[test]
    fn expiring_soon_uses_shared_window() {
        let mut soon = card("A", 0.0, Sector::Other);
        soon.expires_at = Some(now() + Duration::days(4));
        let mut expired = card("B", 0.0, Sector::Other);
        expired.expires_at = Some(now() - Duration::days(12));
        let mut later = card("C", 0.0, Sector::Other);
        later.expires_at = Some(now() + Duration::days(9));
        let never = card("D", 0.0, Sector::Other);

        let cards = [soon, expired, later, never];
        let a = compute_analytics(&cards, now());
        assert_eq!(a.expiring_soon, 2);
        assert_eq!(
            a.expiring_soon,
            cards.iter().filter(|c| c.is_expiring_soon(now())).count() as u64
        );
    }

    #[test]
    fn monthly_histogram_is_chronological() {
        let mut dec = card("A", 0.0, Sector::Other);
        dec.created_at = Utc.with_ymd_and_hms(2023, 12, 15, 0, 0, 0).unwrap();
        let mut jan1 = card("B", 0.0, Sector::Other);
        jan1.created_at = Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap();
        let mut jan2 = card("C", 0.0, Sector::Other);
        jan2.created_at = Utc.with_ymd_and_hms(2024, 1, 20, 0, 0, 0).unwrap();

        let a = compute_analytics(&[jan1, dec, jan2], now());
        assert_eq!(
            a.monthly_histogram,
            vec![
                MonthBucket { month: "2023-12".into(), label: "Dec", count: 1 },
                MonthBucket { month: "2024-01".into(), label: "Jan", count: 2 },
            ]
        );
    }

    #[test]
    fn histograms_serialize_with_sector_labels() {
        let a = compute_analytics(&[card("Gap", 5.0, Sector::FashionClothing)], now());
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["sector_histogram"]["Fashion & Clothing"], 1);
        assert_eq!(json["value_by_sector"]["Fashion & Clothing"], 5.0);
    }
}
