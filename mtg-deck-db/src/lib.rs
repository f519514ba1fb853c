//! SQLite card database used to complete partially known deck cards.
//!
//! Provides the versioned schema, one-shot population from bulk card data,
//! the lookups behind [`mtg_deck_core::CardLookup`], and schema upgrades
//! from SQL patch files (via rusqlite with bundled feature).

pub mod database;
pub mod error;
pub mod migrate;
pub mod populate;
pub mod queries;
pub mod schema;
pub mod version;

pub use database::{CardDatabase, default_database_path};
pub use error::{CardQuery, DbError, MigrationError, SchemaVersionError};
pub use migrate::{MigrationReport, default_patch_dir, open_migrated, update_database_schema};
pub use populate::PopulateStats;
pub use queries::PrintingRecord;
pub use schema::{BASE_SCHEMA_VERSION, COMPATIBLE_SCHEMA_VERSIONS, CompatibleSchemaVersions};
pub use version::{SchemaVersion, VersionError, integer_to_version, version_to_integer};
