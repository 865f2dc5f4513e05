//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the per-entity CRUD contract shared by all dealership records.
//! - Isolate SQLite query details from service/coordinator orchestration.
//!
//! # Invariants
//! - Create/update reject foreign keys that do not resolve (`Reference`).
//! - Get/update/delete of a missing identifier return `NotFound`.
//! - Deleting a referenced parent is not guarded.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::{Entity, EntityKind, Record, RecordId};
use log::{info, warn};
use rusqlite::{Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod manufacturer_repo;
pub mod vehicle_model_repo;
pub mod vehicle_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by every entity repository.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// No `entity` row with identifier `id`.
    NotFound { entity: EntityKind, id: RecordId },
    /// A foreign key points at a missing `entity` row.
    Reference { entity: EntityKind, id: RecordId },
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted data cannot be converted to a valid record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Reference { entity, id } => {
                write!(f, "referenced {entity} does not exist: {id}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::Reference { .. } => None,
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// CRUD contract implemented once per entity type.
pub trait CrudRepository {
    /// Field data stored for one row.
    type Fields: Entity + Clone;
    /// List row, enriched with the parent record where one exists.
    type Listing;

    /// Every stored record, join-enriched, ordered by ascending id.
    fn list_all(&self) -> RepoResult<Vec<Self::Listing>>;
    /// Every stored record without enrichment, ordered by ascending id.
    fn list_records(&self) -> RepoResult<Vec<Record<Self::Fields>>>;
    fn get_by_id(&self, id: RecordId) -> RepoResult<Record<Self::Fields>>;
    fn create(&self, fields: &Self::Fields) -> RepoResult<Record<Self::Fields>>;
    /// Replaces every field of an existing record.
    fn update(&self, id: RecordId, fields: &Self::Fields) -> RepoResult<Record<Self::Fields>>;
    fn delete(&self, id: RecordId) -> RepoResult<()>;
}

pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    table: &'static str,
    columns: &[&'static str],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, table)? {
        return Err(RepoError::MissingRequiredTable(table));
    }

    for &column in columns {
        if !table_has_column(conn, table, column)? {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn row_exists(conn: &Connection, entity: EntityKind, id: RecordId) -> RepoResult<bool> {
    let found: Option<i64> = conn
        .query_row(
            &format!("SELECT 1 FROM {} WHERE id = ?1;", entity.table()),
            [id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Fails with `NotFound` unless `entity` row `id` exists.
pub(crate) fn ensure_exists(conn: &Connection, entity: EntityKind, id: RecordId) -> RepoResult<()> {
    if row_exists(conn, entity, id)? {
        Ok(())
    } else {
        Err(RepoError::NotFound { entity, id })
    }
}

/// Fails with `Reference` unless parent `entity` row `id` exists.
pub(crate) fn ensure_parent_exists(
    conn: &Connection,
    entity: EntityKind,
    id: RecordId,
) -> RepoResult<()> {
    if row_exists(conn, entity, id)? {
        Ok(())
    } else {
        Err(RepoError::Reference { entity, id })
    }
}

/// Hard-deletes one row; children referencing it are left untouched.
pub(crate) fn delete_row(conn: &Connection, entity: EntityKind, id: RecordId) -> RepoResult<()> {
    let changed = conn.execute(
        &format!("DELETE FROM {} WHERE id = ?1;", entity.table()),
        [id],
    )?;

    if changed == 0 {
        return Err(RepoError::NotFound { entity, id });
    }

    Ok(())
}

/// Emits one `module=repo` event for a finished write.
pub(crate) fn log_write<T>(
    entity: EntityKind,
    op: &str,
    id: Option<RecordId>,
    result: &RepoResult<T>,
) {
    let id = id.map_or_else(|| "-".to_string(), |value| value.to_string());
    match result {
        Ok(_) => info!("event={entity}_{op} module=repo status=ok id={id}"),
        Err(err) => warn!("event={entity}_{op} module=repo status=error id={id} error={err}"),
    }
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

pub(crate) fn parse_bool(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::{bool_to_int, parse_bool, RepoError};

    #[test]
    fn parse_bool_accepts_only_zero_and_one() {
        assert!(!parse_bool(0, "veiculo.vendido").unwrap());
        assert!(parse_bool(1, "veiculo.vendido").unwrap());
        let err = parse_bool(2, "veiculo.vendido").unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(message) if message.contains("veiculo.vendido")));
    }

    #[test]
    fn bool_to_int_maps_to_sqlite_integers() {
        assert_eq!(bool_to_int(true), 1);
        assert_eq!(bool_to_int(false), 0);
    }
}
