//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod gift_card_repo;

pub use gift_card_repo::{CardListFilter, GiftCardRepo};
