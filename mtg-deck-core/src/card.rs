use serde::{Deserialize, Serialize};

/// Language assumed for cards when the input does not state one.
pub const DEFAULT_LANGUAGE: &str = "EN";

/// A single card entry of a deck.
///
/// Name, set and collector number may be unknown after parsing an input
/// file. [`crate::fill_card`] resolves them against a card database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub english_name: Option<String>,
    pub set_abbreviation: Option<String>,
    /// Kept as a string because some printings carry letter suffixes, e.g. "86a".
    pub collector_number: Option<String>,
    pub language: String,
    pub foil: bool,
    pub condition: Option<String>,
}

impl Default for Card {
    fn default() -> Self {
        Self {
            english_name: None,
            set_abbreviation: None,
            collector_number: None,
            language: DEFAULT_LANGUAGE.to_string(),
            foil: false,
            condition: None,
        }
    }
}

impl Card {
    /// A card known only by its English name.
    pub fn named(english_name: impl Into<String>) -> Self {
        Self {
            english_name: Some(english_name.into()),
            ..Default::default()
        }
    }

    /// A card known only by its printing (set and collector number).
    pub fn printed(set_abbreviation: impl Into<String>, collector_number: impl Into<String>) -> Self {
        Self {
            set_abbreviation: Some(set_abbreviation.into()),
            collector_number: Some(collector_number.into()),
            ..Default::default()
        }
    }

    pub fn with_set(mut self, set_abbreviation: impl Into<String>) -> Self {
        self.set_abbreviation = Some(set_abbreviation.into());
        self
    }

    pub fn with_collector_number(mut self, collector_number: impl Into<String>) -> Self {
        self.collector_number = Some(collector_number.into());
        self
    }

    /// English name, treating an empty string as unknown.
    pub fn name(&self) -> Option<&str> {
        present(&self.english_name)
    }

    /// Set abbreviation, treating an empty string as unknown.
    pub fn set(&self) -> Option<&str> {
        present(&self.set_abbreviation)
    }

    /// Collector number, treating an empty string as unknown.
    pub fn number(&self) -> Option<&str> {
        present(&self.collector_number)
    }

    /// True when name, set and collector number are all known.
    pub fn is_complete(&self) -> bool {
        self.name().is_some() && self.set().is_some() && self.number().is_some()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}:{}]",
            self.name().unwrap_or("?"),
            self.set().unwrap_or("?"),
            self.number().unwrap_or("?"),
        )
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
