/// Printing rarity as stored in the card database.
///
/// `Land` does not exist in the bulk data. It replaces the nominal rarity of
/// the five basic lands, which are printed in almost every set and need to be
/// told apart from regular commons by output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Mythic,
    Special,
    Bonus,
    Land,
}

/// All rarity variants in database insertion order.
const ALL_RARITIES: &[Rarity] = &[
    Rarity::Common,
    Rarity::Uncommon,
    Rarity::Rare,
    Rarity::Mythic,
    Rarity::Special,
    Rarity::Bonus,
    Rarity::Land,
];

/// English names of the basic lands that get the synthetic `Land` rarity.
pub const BASIC_LAND_NAMES: [&str; 5] = ["Plains", "Island", "Swamp", "Mountain", "Forest"];

impl Rarity {
    /// Name stored in the `Rarity` table.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::Mythic => "Mythic",
            Self::Special => "Special",
            Self::Bonus => "Bonus",
            Self::Land => "Land",
        }
    }

    pub fn all() -> &'static [Rarity] {
        ALL_RARITIES
    }

    /// Rarity to store for a printing of `english_name` with the bulk data
    /// rarity string `rarity` (e.g. "common", "mythic").
    ///
    /// Basic lands always map to `Land`. Everything else is title-cased and
    /// matched against the closed set of rarity names.
    pub fn for_printing(english_name: &str, rarity: &str) -> Result<Self, ParseRarityError> {
        if BASIC_LAND_NAMES.contains(&english_name) {
            return Ok(Self::Land);
        }
        title_case(rarity).parse()
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string does not name a known rarity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rarity: '{0}'")]
pub struct ParseRarityError(pub String);

impl std::str::FromStr for Rarity {
    type Err = ParseRarityError;

    /// Parse the stored (title-cased) rarity name. Matching is exact.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_RARITIES
            .iter()
            .copied()
            .find(|rarity| rarity.name() == s)
            .ok_or_else(|| ParseRarityError(s.to_string()))
    }
}

/// Upper-case the first letter of every whitespace separated word and
/// lower-case the rest.
fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
#[path = "tests/rarity_tests.rs"]
mod tests;
