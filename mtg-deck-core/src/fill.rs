//! Completion of partially known card entries.
//!
//! Input formats rarely carry everything an output format needs. A card may
//! be listed by name only, or by set and collector number only. The functions
//! here fill the gaps through a [`CardLookup`] implementation.

use crate::card::Card;
use crate::deck::{CardRef, Deck, Zone};

/// A printing reference: set abbreviation plus collector number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SetAndNumber {
    pub set_abbreviation: String,
    pub collector_number: String,
}

/// Lookups used to resolve missing card fields.
///
/// Set abbreviations and collector numbers are matched case-insensitively.
/// A lookup that finds nothing returns an error.
pub trait CardLookup {
    type Error;

    fn is_set_abbreviation_known(&self, set_abbreviation: &str) -> Result<bool, Self::Error>;

    /// Some printing of the named card. Which one is unspecified when the
    /// card was printed more than once.
    fn set_and_number_for_name(&self, english_name: &str) -> Result<SetAndNumber, Self::Error>;

    fn collector_number_for_card_in_set(
        &self,
        english_name: &str,
        set_abbreviation: &str,
    ) -> Result<String, Self::Error>;

    fn set_for_card_with_collector_number(
        &self,
        english_name: &str,
        collector_number: &str,
    ) -> Result<String, Self::Error>;

    fn english_name_for_printing(
        &self,
        set_abbreviation: &str,
        collector_number: &str,
    ) -> Result<String, Self::Error>;
}

/// Which resolution step [`fill_card`] performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Set and collector number were guessed from the name.
    SetAndNumberByName,
    NumberByNameAndSet,
    SetByNameAndNumber,
    NameBySetAndNumber,
    /// Nothing to do.
    AlreadyComplete,
    /// Neither the name nor the full printing is known.
    Insufficient,
}

/// Fill the missing fields of a single card.
///
/// A set abbreviation the lookup does not know is never trusted: the card is
/// then resolved by name alone and both set and collector number are
/// replaced.
pub fn fill_card<L: CardLookup>(card: &mut Card, lookup: &L) -> Result<Resolution, L::Error> {
    let name = card.name().map(str::to_owned);
    let set = card.set().map(str::to_owned);
    let number = card.number().map(str::to_owned);

    let resolution = match (name, set, number) {
        (Some(name), Some(set), number) if lookup.is_set_abbreviation_known(&set)? => match number {
            Some(_) => Resolution::AlreadyComplete,
            None => {
                let number = lookup.collector_number_for_card_in_set(&name, &set)?;
                card.collector_number = Some(number);
                Resolution::NumberByNameAndSet
            }
        },
        (Some(name), None, Some(number)) => {
            let set = lookup.set_for_card_with_collector_number(&name, &number)?;
            card.set_abbreviation = Some(set);
            Resolution::SetByNameAndNumber
        }
        (Some(name), set, _) => {
            if let Some(set) = set {
                log::debug!("Set '{set}' of card '{name}' is unknown, resolving by name");
            }
            let found = lookup.set_and_number_for_name(&name)?;
            card.set_abbreviation = Some(found.set_abbreviation);
            card.collector_number = Some(found.collector_number);
            Resolution::SetAndNumberByName
        }
        (None, Some(set), Some(number)) => {
            let name = lookup.english_name_for_printing(&set, &number)?;
            card.english_name = Some(name);
            Resolution::NameBySetAndNumber
        }
        (None, _, _) => Resolution::Insufficient,
    };
    log::debug!("Card resolution {resolution:?}: {card}");
    Ok(resolution)
}

/// A card that could not be completed.
#[derive(Debug)]
pub struct FillFailure<E> {
    pub card: CardRef,
    pub error: E,
}

impl Deck {
    /// Fill missing information for every card in all four zones.
    ///
    /// Stops at the first failed lookup; cards visited before it stay filled.
    pub fn fill_missing_information<L: CardLookup>(&mut self, lookup: &L) -> Result<(), L::Error> {
        for zone in Zone::ALL {
            for card in self.zone_mut(zone).iter_mut() {
                fill_card(card, lookup)?;
            }
        }
        Ok(())
    }

    /// Fill missing information for every card, continuing past failures.
    ///
    /// Returns the cards that could not be completed.
    pub fn fill_missing_information_each<L: CardLookup>(
        &mut self,
        lookup: &L,
    ) -> Vec<FillFailure<L::Error>> {
        let mut failures = Vec::new();
        for zone in Zone::ALL {
            for (index, card) in self.zone_mut(zone).iter_mut().enumerate() {
                if let Err(error) = fill_card(card, lookup) {
                    log::warn!("Could not complete card {card} in the {zone} zone");
                    failures.push(FillFailure {
                        card: CardRef { zone, index },
                        error,
                    });
                }
            }
        }
        failures
    }
}

#[cfg(test)]
#[path = "tests/fill_tests.rs"]
mod tests;
