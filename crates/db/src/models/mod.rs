//! Database row structs.
//!
//! Rows are converted into core domain types at the repository boundary;
//! nothing above this crate sees them.

pub mod gift_card;
