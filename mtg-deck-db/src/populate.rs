//! One-shot bulk import of card data.

use chrono::NaiveDate;
use mtg_deck_core::{BulkCard, Rarity};
use rusqlite::{Transaction, params};

use crate::database::CardDatabase;
use crate::error::DbError;

/// Counts of rows written by [`CardDatabase::populate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopulateStats {
    pub cards: usize,
    pub sets: usize,
    pub printings: usize,
    /// Records without an oracle identity, which cannot be stored.
    pub skipped: usize,
}

impl CardDatabase {
    /// True if at least one printing is stored.
    pub fn is_populated(&self) -> Result<bool, DbError> {
        let populated: bool = self
            .conn()?
            .query_row("SELECT EXISTS(SELECT 1 FROM Printing)", [], |row| row.get(0))?;
        Ok(populated)
    }

    /// Import the bulk card data.
    ///
    /// Does nothing and returns `None` if the database is already populated;
    /// there is no incremental update. Otherwise all records are written in a
    /// single transaction. Any error rolls back every row written so far, so
    /// a failed import leaves the database unpopulated and can be retried.
    pub fn populate(&mut self, cards: &[BulkCard]) -> Result<Option<PopulateStats>, DbError> {
        if self.is_populated()? {
            log::warn!("The database already contains data. Skipping the population process.");
            return Ok(None);
        }
        log::info!("Populating the card database with {} records...", cards.len());

        let tx = self.conn_mut()?.transaction()?;
        let mut stats = PopulateStats::default();
        for card in cards {
            insert_record(&tx, card, &mut stats)?;
        }
        tx.commit()?;

        log::info!(
            "Populated the card database: {} cards, {} sets, {} printings, {} skipped records",
            stats.cards,
            stats.sets,
            stats.printings,
            stats.skipped
        );
        Ok(Some(stats))
    }
}

fn insert_record(tx: &Transaction<'_>, card: &BulkCard, stats: &mut PopulateStats) -> Result<(), DbError> {
    let Some(oracle_id) = card.oracle_id.as_deref() else {
        log::debug!("Skipping '{}' ({}), it has no oracle id", card.name, card.id);
        stats.skipped += 1;
        return Ok(());
    };

    let release_date = NaiveDate::parse_from_str(&card.released_at, "%Y-%m-%d").map_err(|_| {
        DbError::InvalidReleaseDate {
            set: card.set.clone(),
            value: card.released_at.clone(),
        }
    })?;
    let rarity = Rarity::for_printing(&card.name, &card.rarity).map_err(|_| DbError::UnknownRarity {
        card: card.name.clone(),
        rarity: card.rarity.clone(),
    })?;

    stats.cards += tx
        .prepare_cached(
            "INSERT INTO Card (Scryfall_Oracle_ID, English_Name, Type)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(Scryfall_Oracle_ID) DO NOTHING",
        )?
        .execute(params![oracle_id, card.name, card.primary_type()])?;

    stats.sets += tx
        .prepare_cached(
            "INSERT INTO Card_Set (Abbreviation, English_Name, Release_Date)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(Abbreviation) DO NOTHING",
        )?
        .execute(params![
            card.set,
            card.set_name,
            release_date.format("%Y-%m-%d").to_string()
        ])?;

    // Card and set rows are found through their natural keys; the cross join
    // yields exactly one row because both keys are unique.
    stats.printings += tx
        .prepare_cached(
            "INSERT INTO Printing (Card_ID, Set_ID, Rarity_ID, Collector_Number, Scryfall_Card_ID)
             SELECT Card_ID, Set_ID, Rarity_ID, ?1, ?2
             FROM Card, Card_Set, Rarity
             WHERE Card.Scryfall_Oracle_ID = ?3
               AND Card_Set.Abbreviation = ?4
               AND Rarity.Name = ?5",
        )?
        .execute(params![
            card.collector_number,
            card.id,
            oracle_id,
            card.set,
            rarity.name()
        ])?;
    Ok(())
}
