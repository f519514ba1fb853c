use std::path::PathBuf;

use thiserror::Error;

use crate::version::{SchemaVersion, VersionError, integer_to_version};

/// Errors raised by the card database.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    SchemaVersion(#[from] SchemaVersionError),

    #[error("Invalid state: the card database was closed twice")]
    DoubleClose,

    #[error("The card database is closed")]
    Closed,

    #[error("Card not found: {0}")]
    CardNotFound(CardQuery),

    #[error("Unknown rarity '{rarity}' for card '{card}'")]
    UnknownRarity { card: String, rarity: String },

    #[error("Invalid release date '{value}' for set '{set}'")]
    InvalidReleaseDate { set: String, value: String },

    #[error("Could not determine the data directory")]
    NoDataDir,

    #[error("Stored schema version {0} is not a valid version number")]
    InvalidStoredVersion(i64),
}

/// The schema version of an opened database is outside the compatible range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaVersionError {
    #[error(
        "Schema version mismatch. Expected at least {}, but got {}. The database needs to be migrated.",
        integer_to_version(*.minimum),
        integer_to_version(*.found)
    )]
    TooOld { found: u64, minimum: u64 },

    #[error(
        "Schema version too high. Expected a version below {}, but got {}. Automatic downgrades are not supported.",
        integer_to_version(*.maximum),
        integer_to_version(*.found)
    )]
    TooNew { found: u64, maximum: u64 },
}

/// The parameters of a lookup that found no printing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardQuery {
    Name {
        english_name: String,
    },
    NameAndSet {
        english_name: String,
        set_abbreviation: String,
    },
    NameAndNumber {
        english_name: String,
        collector_number: String,
    },
    SetAndNumber {
        set_abbreviation: String,
        collector_number: String,
    },
}

impl std::fmt::Display for CardQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name { english_name } => write!(f, "name '{english_name}'"),
            Self::NameAndSet {
                english_name,
                set_abbreviation,
            } => write!(f, "name '{english_name}' in set '{set_abbreviation}'"),
            Self::NameAndNumber {
                english_name,
                collector_number,
            } => write!(f, "name '{english_name}' with collector number '{collector_number}'"),
            Self::SetAndNumber {
                set_abbreviation,
                collector_number,
            } => write!(f, "set '{set_abbreviation}' with collector number '{collector_number}'"),
        }
    }
}

/// Errors raised while upgrading the database schema with patch files.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid patch name '{name}' in {}: {source}", .dir.display())]
    InvalidPatchName {
        dir: PathBuf,
        name: String,
        source: VersionError,
    },

    #[error(
        "Patch for version {group} cannot be applied to a database with version {}. Missing intermediate patches?",
        integer_to_version(*.current)
    )]
    MissingPatch { group: SchemaVersion, current: u64 },

    #[error(
        "Patch from {from} to {to} did not set the schema version properly. Expected {to}, got {}.",
        integer_to_version(*.found)
    )]
    PatchIntegrity {
        from: SchemaVersion,
        to: SchemaVersion,
        found: u64,
    },

    #[error(
        "Available patches did not update the database to a usable schema version. Expected a version between {minimum} and {maximum}, got {}.",
        integer_to_version(*.found)
    )]
    MigrationIncomplete {
        found: u64,
        minimum: SchemaVersion,
        maximum: SchemaVersion,
    },

    #[error(transparent)]
    Version(#[from] VersionError),
}
