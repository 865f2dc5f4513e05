//! Explicit storage handle shared by request handlers.

use super::{open_db, DbResult};
use log::info;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Location of the dealership database.
///
/// Cloning is cheap; each request acquires its own connection through
/// [`Storage::connect`] and drops it when the request finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the database file if needed and applies migrations once.
    ///
    /// Called at process start so schema problems surface before serving.
    pub fn initialize(&self) -> DbResult<()> {
        let conn = self.connect()?;
        drop(conn);
        info!(
            "event=storage_init module=db status=ok path={}",
            self.path.display()
        );
        Ok(())
    }

    /// Opens a fresh, migrated connection scoped to the caller.
    pub fn connect(&self) -> DbResult<Connection> {
        open_db(&self.path)
    }
}
