//! Domain logic for GiftiGo.
//!
//! Everything in this crate is independent of the database and HTTP layers:
//! records are passed in by the caller, and persistence is reached only
//! through the [`store::CardStore`] and [`logo::LogoLookup`] ports.

pub mod analytics;
pub mod brand_color;
pub mod card;
pub mod dashboard;
pub mod error;
pub mod expiry;
pub mod logo;
pub mod optimistic;
pub mod samples;
pub mod sector;
pub mod store;
pub mod types;
pub mod view_model;
