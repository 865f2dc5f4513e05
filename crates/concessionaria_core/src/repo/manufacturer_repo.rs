//! Manufacturer repository over the `montadora` table.

use crate::model::manufacturer::Manufacturer;
use crate::model::{EntityKind, Record, RecordId};
use crate::repo::{
    delete_row, ensure_connection_ready, ensure_exists, log_write, CrudRepository, RepoError,
    RepoResult,
};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const KIND: EntityKind = EntityKind::Manufacturer;

const MANUFACTURER_COLUMNS: &[&str] = &["id", "nome", "pais", "ano_fundacao"];

const MANUFACTURER_SELECT_SQL: &str = "SELECT
    id,
    nome,
    pais,
    ano_fundacao
FROM montadora";

/// SQLite-backed manufacturer repository.
pub struct SqliteManufacturerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteManufacturerRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, KIND.table(), MANUFACTURER_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl CrudRepository for SqliteManufacturerRepository<'_> {
    type Fields = Manufacturer;
    type Listing = Record<Manufacturer>;

    fn list_all(&self) -> RepoResult<Vec<Record<Manufacturer>>> {
        self.list_records()
    }

    fn list_records(&self) -> RepoResult<Vec<Record<Manufacturer>>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MANUFACTURER_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut manufacturers = Vec::new();
        while let Some(row) = rows.next()? {
            manufacturers.push(read_manufacturer(row, 0)?);
        }
        Ok(manufacturers)
    }

    fn get_by_id(&self, id: RecordId) -> RepoResult<Record<Manufacturer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MANUFACTURER_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return read_manufacturer(row, 0);
        }
        Err(RepoError::NotFound { entity: KIND, id })
    }

    fn create(&self, fields: &Manufacturer) -> RepoResult<Record<Manufacturer>> {
        let result = insert_manufacturer(self.conn, fields);
        log_write(KIND, "create", result.as_ref().ok().copied(), &result);
        Ok(Record::new(result?, fields.clone()))
    }

    fn update(&self, id: RecordId, fields: &Manufacturer) -> RepoResult<Record<Manufacturer>> {
        let result = update_manufacturer(self.conn, id, fields);
        log_write(KIND, "update", Some(id), &result);
        result?;
        Ok(Record::new(id, fields.clone()))
    }

    fn delete(&self, id: RecordId) -> RepoResult<()> {
        let result = delete_row(self.conn, KIND, id);
        log_write(KIND, "delete", Some(id), &result);
        result
    }
}

fn insert_manufacturer(conn: &Connection, fields: &Manufacturer) -> RepoResult<RecordId> {
    conn.execute(
        "INSERT INTO montadora (nome, pais, ano_fundacao) VALUES (?1, ?2, ?3);",
        params![
            fields.name.as_str(),
            fields.country.as_str(),
            fields.founded_year
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn update_manufacturer(conn: &Connection, id: RecordId, fields: &Manufacturer) -> RepoResult<()> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    ensure_exists(&tx, KIND, id)?;
    tx.execute(
        "UPDATE montadora
         SET
            nome = ?1,
            pais = ?2,
            ano_fundacao = ?3
         WHERE id = ?4;",
        params![
            fields.name.as_str(),
            fields.country.as_str(),
            fields.founded_year,
            id
        ],
    )?;
    tx.commit()?;
    Ok(())
}

/// Reads four manufacturer columns (`id, nome, pais, ano_fundacao`) starting
/// at column index `start`.
pub(crate) fn read_manufacturer(row: &Row<'_>, start: usize) -> RepoResult<Record<Manufacturer>> {
    Ok(Record::new(
        row.get(start)?,
        Manufacturer {
            name: row.get(start + 1)?,
            country: row.get(start + 2)?,
            founded_year: row.get(start + 3)?,
        },
    ))
}
