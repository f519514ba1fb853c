//! Core types for converting Magic: The Gathering deck lists.
//!
//! Holds the in-memory deck model, the bulk card data record, card rarities,
//! and the algorithm that completes partially known cards through a
//! [`CardLookup`] implementation. Persistence lives in `mtg-deck-db`.

pub mod bulk;
pub mod card;
pub mod deck;
pub mod fill;
pub mod rarity;

pub use bulk::{BulkCard, primary_type};
pub use card::{Card, DEFAULT_LANGUAGE};
pub use deck::{CardRef, Deck, Zone};
pub use fill::{CardLookup, FillFailure, Resolution, SetAndNumber, fill_card};
pub use rarity::{BASIC_LAND_NAMES, ParseRarityError, Rarity};
