//! Read queries used to resolve partially known cards.
//!
//! All lookups go through the `Printing_Lookup` view, which stores set
//! abbreviations and collector numbers lower-cased. Query parameters are
//! lower-cased the same way (ASCII only, like SQLite's `lower()`).

use mtg_deck_core::{CardLookup, Rarity, SetAndNumber};
use rusqlite::{OptionalExtension, Row, params};

use crate::database::CardDatabase;
use crate::error::{CardQuery, DbError};

/// One printing of a card, as listed by [`CardDatabase::printings_for_name`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintingRecord {
    pub english_name: String,
    pub set_abbreviation: String,
    pub set_name: String,
    pub collector_number: String,
    pub release_date: Option<String>,
    pub rarity: Rarity,
    pub card_type: Option<String>,
    pub scryfall_card_id: String,
}

fn row_to_printing(row: &Row<'_>) -> rusqlite::Result<PrintingRecord> {
    let rarity: String = row.get(5)?;
    let rarity = rarity.parse::<Rarity>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(PrintingRecord {
        english_name: row.get(0)?,
        set_abbreviation: row.get(1)?,
        set_name: row.get(2)?,
        collector_number: row.get(3)?,
        release_date: row.get(4)?,
        rarity,
        card_type: row.get(6)?,
        scryfall_card_id: row.get(7)?,
    })
}

fn normalize(value: &str) -> String {
    value.to_ascii_lowercase()
}

impl CardDatabase {
    /// Set abbreviation and collector number of some printing of the card.
    ///
    /// If the card was printed more than once, the first row the database
    /// returns wins. No particular printing is guaranteed.
    pub fn set_and_number_for_name(&self, english_name: &str) -> Result<SetAndNumber, DbError> {
        self.conn()?
            .prepare_cached(
                "SELECT Set_Abbreviation, Collector_Number
                 FROM Printing_Lookup WHERE English_Name = ?1 LIMIT 1",
            )?
            .query_row(params![english_name], |row| {
                Ok(SetAndNumber {
                    set_abbreviation: row.get(0)?,
                    collector_number: row.get(1)?,
                })
            })
            .optional()?
            .ok_or_else(|| {
                not_found(CardQuery::Name {
                    english_name: english_name.to_string(),
                })
            })
    }

    /// Collector number of the card in the given set.
    pub fn collector_number_for_card_in_set(
        &self,
        english_name: &str,
        set_abbreviation: &str,
    ) -> Result<String, DbError> {
        self.conn()?
            .prepare_cached(
                "SELECT Collector_Number FROM Printing_Lookup
                 WHERE English_Name = ?1 AND Set_Abbreviation = ?2 LIMIT 1",
            )?
            .query_row(params![english_name, normalize(set_abbreviation)], |row| row.get(0))
            .optional()?
            .ok_or_else(|| {
                not_found(CardQuery::NameAndSet {
                    english_name: english_name.to_string(),
                    set_abbreviation: set_abbreviation.to_string(),
                })
            })
    }

    /// Set abbreviation of the printing of the card with the collector number.
    pub fn set_for_card_with_collector_number(
        &self,
        english_name: &str,
        collector_number: &str,
    ) -> Result<String, DbError> {
        self.conn()?
            .prepare_cached(
                "SELECT Set_Abbreviation FROM Printing_Lookup
                 WHERE English_Name = ?1 AND Collector_Number = ?2 LIMIT 1",
            )?
            .query_row(params![english_name, normalize(collector_number)], |row| row.get(0))
            .optional()?
            .ok_or_else(|| {
                not_found(CardQuery::NameAndNumber {
                    english_name: english_name.to_string(),
                    collector_number: collector_number.to_string(),
                })
            })
    }

    /// English name of the card printed in the set under the collector number.
    pub fn english_name_for_printing(
        &self,
        set_abbreviation: &str,
        collector_number: &str,
    ) -> Result<String, DbError> {
        self.conn()?
            .prepare_cached(
                "SELECT English_Name FROM Printing_Lookup
                 WHERE Set_Abbreviation = ?1 AND Collector_Number = ?2 LIMIT 1",
            )?
            .query_row(
                params![normalize(set_abbreviation), normalize(collector_number)],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| {
                not_found(CardQuery::SetAndNumber {
                    set_abbreviation: set_abbreviation.to_string(),
                    collector_number: collector_number.to_string(),
                })
            })
    }

    /// True if a set with this abbreviation is stored (case-insensitive).
    pub fn is_set_abbreviation_known(&self, set_abbreviation: &str) -> Result<bool, DbError> {
        let known: bool = self.conn()?.query_row(
            "SELECT EXISTS(SELECT 1 FROM Card_Set WHERE lower(Abbreviation) = ?1)",
            params![normalize(set_abbreviation)],
            |row| row.get(0),
        )?;
        Ok(known)
    }

    /// Every stored printing of the card, oldest set first.
    pub fn printings_for_name(&self, english_name: &str) -> Result<Vec<PrintingRecord>, DbError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT English_Name, Set_Abbreviation, Set_Name, Collector_Number,
                    Release_Date, Rarity, Type, Scryfall_Card_ID
             FROM Printing_Lookup WHERE English_Name = ?1
             ORDER BY Release_Date, Set_Abbreviation, Collector_Number",
        )?;
        let rows = stmt.query_map(params![english_name], row_to_printing)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

fn not_found(query: CardQuery) -> DbError {
    log::debug!("Card lookup failed: {query}");
    DbError::CardNotFound(query)
}

impl CardLookup for CardDatabase {
    type Error = DbError;

    fn is_set_abbreviation_known(&self, set_abbreviation: &str) -> Result<bool, DbError> {
        CardDatabase::is_set_abbreviation_known(self, set_abbreviation)
    }

    fn set_and_number_for_name(&self, english_name: &str) -> Result<SetAndNumber, DbError> {
        CardDatabase::set_and_number_for_name(self, english_name)
    }

    fn collector_number_for_card_in_set(
        &self,
        english_name: &str,
        set_abbreviation: &str,
    ) -> Result<String, DbError> {
        CardDatabase::collector_number_for_card_in_set(self, english_name, set_abbreviation)
    }

    fn set_for_card_with_collector_number(
        &self,
        english_name: &str,
        collector_number: &str,
    ) -> Result<String, DbError> {
        CardDatabase::set_for_card_with_collector_number(self, english_name, collector_number)
    }

    fn english_name_for_printing(
        &self,
        set_abbreviation: &str,
        collector_number: &str,
    ) -> Result<String, DbError> {
        CardDatabase::english_name_for_printing(self, set_abbreviation, collector_number)
    }
}
