pub mod analytics;
pub mod brand_logo;
pub mod cards;
pub mod sectors;
