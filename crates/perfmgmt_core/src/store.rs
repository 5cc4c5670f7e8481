//! Local store handle.
//!
//! # Responsibility
//! - Own one migrated SQLite connection for the lifetime of the store.
//! - Hand out repositories that borrow that connection.
//!
//! # Invariants
//! - The connection is opened through `db::open_db*`, so foreign keys are on
//!   and the schema is at the latest version.
//! - No process-wide connection state exists; every store is independent.

use crate::config::StoreConfig;
use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::repo::employee_repo::SqliteEmployeeRepository;
use crate::repo::error::RepoResult;
use crate::repo::review_repo::SqliteReviewRepository;
use rusqlite::Connection;
use std::path::Path;

/// Exclusive owner of the local relational store.
pub struct LocalStore {
    conn: Connection,
}

impl LocalStore {
    /// Opens (or creates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens the database file named by `config`.
    pub fn open_with_config(config: &StoreConfig) -> DbResult<Self> {
        Self::open(&config.database_path)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn employees(&self) -> RepoResult<SqliteEmployeeRepository<'_>> {
        SqliteEmployeeRepository::try_new(&self.conn)
    }

    pub fn reviews(&self) -> RepoResult<SqliteReviewRepository<'_>> {
        SqliteReviewRepository::try_new(&self.conn)
    }

    /// Raw connection access for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
