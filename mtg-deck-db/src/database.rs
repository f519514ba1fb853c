//! The card database handle.

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::error::{DbError, SchemaVersionError};
use crate::schema::{self, COMPATIBLE_SCHEMA_VERSIONS};
use crate::version::integer_to_version;

/// Offline database with card, set and printing data.
///
/// It has to be populated once from the bulk card data and is then used to
/// fill in card information missing from parsed deck lists, e.g. the
/// collector numbers an output format requires.
///
/// The connection is released by [`CardDatabase::close`] or when the handle
/// is dropped. Uncommitted writes are rolled back in both cases.
pub struct CardDatabase {
    conn: Option<Connection>,
}

/// Default location of the card database file.
pub fn default_database_path() -> Result<PathBuf, DbError> {
    let base = dirs::data_dir().ok_or(DbError::NoDataDir)?;
    Ok(base.join("mtg-deck-converter").join("cards.sqlite3"))
}

impl CardDatabase {
    /// Open or create the database at `path`.
    ///
    /// An empty database gets the current schema. With `validate_schema`,
    /// a schema version outside [`COMPATIBLE_SCHEMA_VERSIONS`] is an error;
    /// open without validation to migrate an older file.
    pub fn open(path: &Path, validate_schema: bool) -> Result<Self, DbError> {
        log::info!(
            "About to open database: {}, validating schema: {validate_schema}",
            path.display()
        );
        Self::from_connection(Connection::open(path)?, validate_schema)
    }

    /// Open a fresh in-memory database with the full schema.
    pub fn open_memory() -> Result<Self, DbError> {
        Self::from_connection(Connection::open_in_memory()?, true)
    }

    fn from_connection(mut conn: Connection, validate_schema: bool) -> Result<Self, DbError> {
        schema::create_schema_if_absent(&mut conn)?;
        let db = Self { conn: Some(conn) };
        if validate_schema {
            db.validate_schema_version()?;
            log::info!("Opened database in checked mode and schema version checks passed.");
        } else {
            log::info!("Opened database in unchecked mode. No schema version checks were performed.");
        }
        db.conn()?.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(db)
    }

    /// Check the schema version against [`COMPATIBLE_SCHEMA_VERSIONS`].
    pub fn validate_schema_version(&self) -> Result<(), DbError> {
        let found = self.current_schema_version()?;
        let minimum = COMPATIBLE_SCHEMA_VERSIONS.min_integer();
        let maximum = COMPATIBLE_SCHEMA_VERSIONS.max_integer();
        if found < minimum {
            let err = SchemaVersionError::TooOld { found, minimum };
            log::error!("{err}");
            return Err(err.into());
        }
        if found >= maximum {
            let err = SchemaVersionError::TooNew { found, maximum };
            log::error!("{err}");
            return Err(err.into());
        }
        Ok(())
    }

    /// The encoded schema version stored in the database.
    pub fn current_schema_version(&self) -> Result<u64, DbError> {
        schema::read_schema_version(self.conn()?)
    }

    /// The schema version as a dotted string, for messages.
    pub fn current_schema_version_string(&self) -> Result<String, DbError> {
        Ok(integer_to_version(self.current_schema_version()?))
    }

    /// Read access to the underlying connection.
    pub fn connection(&self) -> Result<&Connection, DbError> {
        self.conn()
    }

    pub(crate) fn conn(&self) -> Result<&Connection, DbError> {
        self.conn.as_ref().ok_or(DbError::Closed)
    }

    pub(crate) fn conn_mut(&mut self) -> Result<&mut Connection, DbError> {
        self.conn.as_mut().ok_or(DbError::Closed)
    }

    pub fn is_closed(&self) -> bool {
        self.conn.is_none()
    }

    /// Close the connection. Closing an already closed database is an error.
    pub fn close(&mut self) -> Result<(), DbError> {
        let Some(conn) = self.conn.take() else {
            log::error!("Invalid state: close() called twice!");
            return Err(DbError::DoubleClose);
        };
        release(conn)
    }
}

impl Drop for CardDatabase {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err(e) = release(conn) {
                log::warn!("Failed to close card database: {e}");
            }
        }
    }
}

fn release(conn: Connection) -> Result<(), DbError> {
    if !conn.is_autocommit() {
        log::warn!("Rolling back uncommitted changes before closing the card database");
        conn.execute_batch("ROLLBACK;")?;
    }
    conn.close().map_err(|(_, e)| DbError::Sqlite(e))
}
