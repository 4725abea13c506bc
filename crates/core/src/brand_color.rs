//! Brand accent colors.
//!
//! The color is resolved once when a card is created and stored with the
//! record. Resolution is a case-insensitive substring scan over an ordered
//! table; the first matching key wins.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Accent color used when no brand key matches.
pub const DEFAULT_BRAND_COLOR: &str = "hsl(268, 83%, 58%)";

/// Known brand substrings and their colors. Order is significant.
pub const BRAND_COLORS: &[(&str, &str)] = &[
    ("starbucks", "hsl(155, 59%, 27%)"),
    ("spotify", "hsl(141, 73%, 42%)"),
    ("nike", "hsl(0, 0%, 0%)"),
    ("mcdonalds", "hsl(51, 100%, 50%)"),
    ("mcdonald", "hsl(51, 100%, 50%)"),
    ("h&m", "hsl(0, 84%, 60%)"),
    ("gap", "hsl(219, 100%, 66%)"),
    ("american eagle", "hsl(219, 100%, 66%)"),
    ("amazon", "hsl(37, 100%, 50%)"),
    ("apple", "hsl(0, 0%, 0%)"),
    ("google", "hsl(214, 89%, 52%)"),
    ("microsoft", "hsl(214, 89%, 52%)"),
    ("walmart", "hsl(214, 89%, 52%)"),
    ("target", "hsl(0, 84%, 60%)"),
    ("zara", "hsl(0, 0%, 0%)"),
    ("adidas", "hsl(0, 0%, 0%)"),
    ("puma", "hsl(0, 0%, 0%)"),
    ("uber", "hsl(0, 0%, 0%)"),
    ("netflix", "hsl(0, 84%, 60%)"),
    ("youtube", "hsl(0, 84%, 60%)"),
    ("facebook", "hsl(214, 89%, 52%)"),
    ("instagram", "hsl(320, 100%, 50%)"),
    ("twitter", "hsl(203, 89%, 53%)"),
    ("linkedin", "hsl(214, 89%, 52%)"),
    ("samsung", "hsl(214, 89%, 52%)"),
    ("sony", "hsl(0, 0%, 0%)"),
    ("pepsi", "hsl(214, 89%, 52%)"),
    ("coca cola", "hsl(0, 84%, 60%)"),
    ("dominos", "hsl(214, 89%, 52%)"),
    ("pizza hut", "hsl(0, 84%, 60%)"),
    ("kfc", "hsl(0, 84%, 60%)"),
    ("burger king", "hsl(37, 100%, 50%)"),
    ("subway", "hsl(60, 100%, 25%)"),
    ("dunkin", "hsl(24, 100%, 50%)"),
    ("taco bell", "hsl(268, 83%, 58%)"),
];

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve a brand name against an arbitrary ordered table.
///
/// Returns the color of the first entry whose key is a substring of the
/// lowercased name, or `default` when nothing matches.
pub fn resolve_with<'a>(brand_name: &str, table: &[(&str, &'a str)], default: &'a str) -> &'a str {
    let normalized = brand_name.to_lowercase();
    table
        .iter()
        .find(|(key, _)| normalized.contains(key))
        .map(|&(_, color)| color)
        .unwrap_or(default)
}

/// Resolve a brand name against [`BRAND_COLORS`].
///
/// # Examples
///
/// ```
/// use giftigo_core::brand_color::{resolve_brand_color, DEFAULT_BRAND_COLOR};
/// assert_eq!(resolve_brand_color("Starbucks Reserve"), "hsl(155, 59%, 27%)");
/// assert_eq!(resolve_brand_color("Corner Bakery"), DEFAULT_BRAND_COLOR);
/// ```
pub fn resolve_brand_color(brand_name: &str) -> &'static str {
    resolve_with(brand_name, BRAND_COLORS, DEFAULT_BRAND_COLOR)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
