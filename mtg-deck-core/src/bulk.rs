//! Bulk card data records as delivered by the Scryfall bulk-data files.

use serde::{Deserialize, Serialize};

/// One printing from the bulk card data.
///
/// Only the fields needed to populate the card database are decoded; all
/// other fields of the source objects are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkCard {
    /// English name.
    pub name: String,
    /// Shared by every printing of the same card. Absent on a few special
    /// objects (e.g. reversible cards), which cannot be stored.
    #[serde(default)]
    pub oracle_id: Option<String>,
    #[serde(default)]
    pub type_line: Option<String>,
    pub rarity: String,
    /// Printing-specific identifier.
    pub id: String,
    /// Set abbreviation.
    pub set: String,
    pub set_name: String,
    pub collector_number: String,
    /// Set release date, ISO 8601 (`YYYY-MM-DD`).
    pub released_at: String,
}

/// Card types in the order they appear on a type line.
const CARD_TYPES: &[&str] = &[
    "Tribal",
    "Kindred",
    "Artifact",
    "Enchantment",
    "Land",
    "Creature",
    "Planeswalker",
    "Battle",
    "Instant",
    "Sorcery",
    "Conspiracy",
    "Dungeon",
    "Phenomenon",
    "Plane",
    "Scheme",
    "Vanguard",
];

impl BulkCard {
    /// Primary type derived from the type line, if there is one.
    pub fn primary_type(&self) -> Option<String> {
        self.type_line.as_deref().and_then(primary_type)
    }
}

/// Derive the primary card type from a type line.
///
/// Only the front face and the part before the subtype dash are considered.
/// The last card type word wins, so "Artifact Creature — Golem" yields
/// "Creature" and "Legendary Enchantment" yields "Enchantment". Type lines
/// without a recognized card type return the trimmed front face.
pub fn primary_type(type_line: &str) -> Option<String> {
    let front = type_line.split("//").next().unwrap_or_default();
    let types = front.split('—').next().unwrap_or_default().trim();
    if types.is_empty() {
        return None;
    }
    types
        .split_whitespace()
        .rev()
        .find(|word| CARD_TYPES.contains(word))
        .map(str::to_string)
        .or_else(|| Some(types.to_string()))
}
