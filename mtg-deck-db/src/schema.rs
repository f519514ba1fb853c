//! SQLite schema creation and version tracking.
//!
//! The schema version is kept in `PRAGMA user_version` as an encoded
//! [`SchemaVersion`]. Newly created databases start at
//! [`BASE_SCHEMA_VERSION`]; older files are upgraded by [`crate::migrate`].

use rusqlite::Connection;

use crate::error::DbError;
use crate::version::SchemaVersion;

/// Half-open range of schema versions this code can work with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompatibleSchemaVersions {
    pub inclusive_min: SchemaVersion,
    pub exclusive_max: SchemaVersion,
}

impl CompatibleSchemaVersions {
    pub fn contains(&self, version: u64) -> bool {
        self.min_integer() <= version && version < self.max_integer()
    }

    pub(crate) fn min_integer(&self) -> u64 {
        self.inclusive_min.encode_in_range()
    }

    pub(crate) fn max_integer(&self) -> u64 {
        self.exclusive_max.encode_in_range()
    }
}

pub const COMPATIBLE_SCHEMA_VERSIONS: CompatibleSchemaVersions = CompatibleSchemaVersions {
    inclusive_min: SchemaVersion::new(0, 2, 0),
    exclusive_max: SchemaVersion::new(0, 3, 0),
};

/// Version written by [`SCHEMA_SQL`]. Keep in sync with its final pragma.
pub const BASE_SCHEMA_VERSION: SchemaVersion = SchemaVersion::new(0, 2, 0);

/// Read the encoded schema version, 0 for a database without schema.
pub fn read_schema_version(conn: &Connection) -> Result<u64, DbError> {
    let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    u64::try_from(version).map_err(|_| DbError::InvalidStoredVersion(version))
}

/// Create the schema inside one transaction if the database has none yet.
///
/// Returns true if the schema was created.
pub fn create_schema_if_absent(conn: &mut Connection) -> Result<bool, DbError> {
    if read_schema_version(conn)? != 0 {
        return Ok(false);
    }
    log::info!("Opened an empty database, creating database schema...");
    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA_SQL)?;
    tx.commit()?;
    log::debug!("Written schema version {BASE_SCHEMA_VERSION}");
    Ok(true)
}

pub const SCHEMA_SQL: &str = r#"
-- One row per distinct card, shared by all of its printings
CREATE TABLE Card (
    Card_ID INTEGER PRIMARY KEY NOT NULL,
    Scryfall_Oracle_ID TEXT NOT NULL UNIQUE,
    English_Name TEXT NOT NULL,
    Type TEXT
);
CREATE INDEX Card_English_Name_Index ON Card(English_Name);

CREATE TABLE Card_Set (
    Set_ID INTEGER PRIMARY KEY NOT NULL,
    Abbreviation TEXT NOT NULL UNIQUE,
    English_Name TEXT NOT NULL,
    Release_Date TEXT
);

CREATE TABLE Rarity (
    Rarity_ID INTEGER PRIMARY KEY NOT NULL,
    Name TEXT NOT NULL UNIQUE
);
INSERT INTO Rarity (Name) VALUES
    ('Common'), ('Uncommon'), ('Rare'), ('Mythic'), ('Special'), ('Bonus'), ('Land');

-- A card as printed in one set under one collector number
CREATE TABLE Printing (
    Printing_ID INTEGER PRIMARY KEY NOT NULL,
    Card_ID INTEGER NOT NULL REFERENCES Card(Card_ID) ON UPDATE CASCADE ON DELETE CASCADE,
    Set_ID INTEGER NOT NULL REFERENCES Card_Set(Set_ID) ON UPDATE CASCADE ON DELETE CASCADE,
    Rarity_ID INTEGER NOT NULL REFERENCES Rarity(Rarity_ID) ON UPDATE CASCADE ON DELETE RESTRICT,
    Collector_Number TEXT NOT NULL,
    Scryfall_Card_ID TEXT NOT NULL UNIQUE,
    UNIQUE (Card_ID, Set_ID, Collector_Number)
);
CREATE INDEX Printing_Set_Index ON Printing(Set_ID, Collector_Number);

-- Lookup view. Set abbreviations and collector numbers are lower-cased,
-- queries have to lower-case their parameters as well.
CREATE VIEW Printing_Lookup AS
    SELECT
        Card.English_Name AS English_Name,
        lower(Card_Set.Abbreviation) AS Set_Abbreviation,
        lower(Printing.Collector_Number) AS Collector_Number,
        Card_Set.English_Name AS Set_Name,
        Card_Set.Release_Date AS Release_Date,
        Rarity.Name AS Rarity,
        Card.Type AS Type,
        Printing.Scryfall_Card_ID AS Scryfall_Card_ID
    FROM Printing
    INNER JOIN Card USING (Card_ID)
    INNER JOIN Card_Set USING (Set_ID)
    INNER JOIN Rarity USING (Rarity_ID);

PRAGMA user_version = 2000;
"#;
