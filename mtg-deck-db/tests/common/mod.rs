#![allow(dead_code)]

use mtg_deck_core::BulkCard;
use mtg_deck_db::CardDatabase;

pub fn fixture_cards() -> Vec<BulkCard> {
    let json = include_str!("../fixtures/cards.json");
    serde_json::from_str(json).unwrap()
}

pub fn populated_db() -> CardDatabase {
    let mut db = CardDatabase::open_memory().unwrap();
    db.populate(&fixture_cards()).unwrap();
    db
}

pub fn count(db: &CardDatabase, table: &str) -> i64 {
    db.connection()
        .unwrap()
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .unwrap()
}

pub fn bulk_card(name: &str, oracle_id: &str, set: &str, number: &str) -> BulkCard {
    BulkCard {
        name: name.to_string(),
        oracle_id: Some(oracle_id.to_string()),
        type_line: Some("Instant".to_string()),
        rarity: "common".to_string(),
        id: format!("{oracle_id}-{set}-{number}"),
        set: set.to_string(),
        set_name: format!("Set {set}"),
        collector_number: number.to_string(),
        released_at: "2019-01-25".to_string(),
    }
}
