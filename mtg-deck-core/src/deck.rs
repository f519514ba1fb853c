use crate::card::Card;

/// The four card containers of a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Main,
    Side,
    /// Cards under consideration, as exported by some deck builders.
    Maybe,
    /// Cards the owner still has to acquire.
    Acquire,
}

impl Zone {
    /// All zones in listing order.
    pub const ALL: [Zone; 4] = [Zone::Main, Zone::Side, Zone::Maybe, Zone::Acquire];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Side => "side",
            Self::Maybe => "maybe",
            Self::Acquire => "acquire",
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Position of a card entry inside a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardRef {
    pub zone: Zone,
    pub index: usize,
}

/// A deck list.
///
/// Multiple copies of a card are repeated entries. Commanders are not a zone
/// of their own: each commander is a reference to an entry in one of the four
/// zones, so zone membership is the only listing of ownership.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    pub name: String,
    main: Vec<Card>,
    side: Vec<Card>,
    maybe: Vec<Card>,
    acquire: Vec<Card>,
    commanders: Vec<CardRef>,
}

impl Deck {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.is_empty() {
            log::info!("Created an empty deck.");
        } else {
            log::info!("Created an empty deck with name \"{name}\".");
        }
        Self {
            name,
            ..Default::default()
        }
    }

    /// Append a card to `zone`, optionally designating it as a commander.
    pub fn add(&mut self, zone: Zone, card: Card, is_commander: bool) -> CardRef {
        let cards = self.zone_mut(zone);
        cards.push(card);
        let card_ref = CardRef {
            zone,
            index: cards.len() - 1,
        };
        if is_commander {
            log::info!(
                "Adding designated Commander card to the Command zone: {}",
                &self.zone(zone)[card_ref.index]
            );
            self.commanders.push(card_ref);
        }
        card_ref
    }

    pub fn zone(&self, zone: Zone) -> &[Card] {
        match zone {
            Zone::Main => &self.main,
            Zone::Side => &self.side,
            Zone::Maybe => &self.maybe,
            Zone::Acquire => &self.acquire,
        }
    }

    pub(crate) fn zone_mut(&mut self, zone: Zone) -> &mut Vec<Card> {
        match zone {
            Zone::Main => &mut self.main,
            Zone::Side => &mut self.side,
            Zone::Maybe => &mut self.maybe,
            Zone::Acquire => &mut self.acquire,
        }
    }

    pub fn get(&self, card_ref: CardRef) -> Option<&Card> {
        self.zone(card_ref.zone).get(card_ref.index)
    }

    /// Positions of the commanders, in designation order.
    pub fn commander_refs(&self) -> &[CardRef] {
        &self.commanders
    }

    /// Commander cards, resolved through the zones that hold them.
    pub fn commanders(&self) -> impl Iterator<Item = &Card> + '_ {
        self.commanders.iter().filter_map(|card_ref| self.get(*card_ref))
    }

    pub fn is_commander(&self, card_ref: CardRef) -> bool {
        self.commanders.contains(&card_ref)
    }

    /// Every card entry with its position, zone by zone.
    pub fn cards(&self) -> impl Iterator<Item = (CardRef, &Card)> + '_ {
        Zone::ALL.into_iter().flat_map(move |zone| {
            self.zone(zone)
                .iter()
                .enumerate()
                .map(move |(index, card)| (CardRef { zone, index }, card))
        })
    }

    /// Total number of card entries across all zones.
    pub fn len(&self) -> usize {
        Zone::ALL.iter().map(|zone| self.zone(*zone).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "tests/deck_tests.rs"]
mod tests;
