//! Vehicle model repository over the `modeloveiculo` table.
//!
//! # Invariants
//! - `montadora_id` is checked against `montadora` inside the write
//!   transaction.
//! - Listing keeps models whose manufacturer was deleted; they carry no
//!   manufacturer.

use crate::model::manufacturer::Manufacturer;
use crate::model::vehicle_model::VehicleModel;
use crate::model::{EntityKind, Record, RecordId};
use crate::repo::manufacturer_repo::read_manufacturer;
use crate::repo::{
    bool_to_int, delete_row, ensure_connection_ready, ensure_exists, ensure_parent_exists,
    log_write, parse_bool, CrudRepository, RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const KIND: EntityKind = EntityKind::VehicleModel;

const VEHICLE_MODEL_COLUMNS: &[&str] = &[
    "id",
    "nome",
    "montadora_id",
    "valor_referencia",
    "motorizacao",
    "turbo",
    "automatico",
];

const VEHICLE_MODEL_SELECT_SQL: &str = "SELECT
    id,
    nome,
    montadora_id,
    valor_referencia,
    motorizacao,
    turbo,
    automatico
FROM modeloveiculo";

const VEHICLE_MODEL_COLUMN_COUNT: usize = 7;

/// Vehicle model list row with its manufacturer.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleModelListing {
    pub model: Record<VehicleModel>,
    /// `None` when the referenced manufacturer no longer exists.
    pub manufacturer: Option<Record<Manufacturer>>,
}

/// SQLite-backed vehicle model repository.
pub struct SqliteVehicleModelRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteVehicleModelRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, KIND.table(), VEHICLE_MODEL_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl CrudRepository for SqliteVehicleModelRepository<'_> {
    type Fields = VehicleModel;
    type Listing = VehicleModelListing;

    fn list_all(&self) -> RepoResult<Vec<VehicleModelListing>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                m.id,
                m.nome,
                m.montadora_id,
                m.valor_referencia,
                m.motorizacao,
                m.turbo,
                m.automatico,
                p.id,
                p.nome,
                p.pais,
                p.ano_fundacao
             FROM modeloveiculo m
             LEFT JOIN montadora p ON p.id = m.montadora_id
             ORDER BY m.id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut listings = Vec::new();
        while let Some(row) = rows.next()? {
            let model = read_vehicle_model(row, 0)?;
            let parent_id: Option<RecordId> = row.get(VEHICLE_MODEL_COLUMN_COUNT)?;
            let manufacturer = match parent_id {
                Some(_) => Some(read_manufacturer(row, VEHICLE_MODEL_COLUMN_COUNT)?),
                None => None,
            };
            listings.push(VehicleModelListing {
                model,
                manufacturer,
            });
        }
        Ok(listings)
    }

    fn list_records(&self) -> RepoResult<Vec<Record<VehicleModel>>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{VEHICLE_MODEL_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut models = Vec::new();
        while let Some(row) = rows.next()? {
            models.push(read_vehicle_model(row, 0)?);
        }
        Ok(models)
    }

    fn get_by_id(&self, id: RecordId) -> RepoResult<Record<VehicleModel>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{VEHICLE_MODEL_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return read_vehicle_model(row, 0);
        }
        Err(RepoError::NotFound { entity: KIND, id })
    }

    fn create(&self, fields: &VehicleModel) -> RepoResult<Record<VehicleModel>> {
        let result = insert_vehicle_model(self.conn, fields);
        log_write(KIND, "create", result.as_ref().ok().copied(), &result);
        Ok(Record::new(result?, fields.clone()))
    }

    fn update(&self, id: RecordId, fields: &VehicleModel) -> RepoResult<Record<VehicleModel>> {
        let result = update_vehicle_model(self.conn, id, fields);
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

fn insert_vehicle_model(conn: &Connection, fields: &VehicleModel) -> RepoResult<RecordId> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    ensure_parent_exists(&tx, EntityKind::Manufacturer, fields.manufacturer_id)?;
    tx.execute(
        "INSERT INTO modeloveiculo (
            nome,
            montadora_id,
            valor_referencia,
            motorizacao,
            turbo,
            automatico
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
        params![
            fields.name.as_str(),
            fields.manufacturer_id,
            fields.reference_price,
            fields.displacement,
            bool_to_int(fields.turbo),
            bool_to_int(fields.automatic),
        ],
    )?;
    let id = tx.last_insert_rowid();
    tx.commit()?;
    Ok(id)
}

fn update_vehicle_model(conn: &Connection, id: RecordId, fields: &VehicleModel) -> RepoResult<()> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    ensure_exists(&tx, KIND, id)?;
    ensure_parent_exists(&tx, EntityKind::Manufacturer, fields.manufacturer_id)?;
    tx.execute(
        "UPDATE modeloveiculo
         SET
            nome = ?1,
            montadora_id = ?2,
            valor_referencia = ?3,
            motorizacao = ?4,
            turbo = ?5,
            automatico = ?6
         WHERE id = ?7;",
        params![
            fields.name.as_str(),
            fields.manufacturer_id,
            fields.reference_price,
            fields.displacement,
            bool_to_int(fields.turbo),
            bool_to_int(fields.automatic),
            id,
        ],
    )?;
    tx.commit()?;
    Ok(())
}

/// Reads the seven vehicle model columns starting at index `start`.
pub(crate) fn read_vehicle_model(row: &Row<'_>, start: usize) -> RepoResult<Record<VehicleModel>> {
    Ok(Record::new(
        row.get(start)?,
        VehicleModel {
            name: row.get(start + 1)?,
            manufacturer_id: row.get(start + 2)?,
            reference_price: row.get(start + 3)?,
            displacement: row.get(start + 4)?,
            turbo: parse_bool(row.get(start + 5)?, "modeloveiculo.turbo")?,
            automatic: parse_bool(row.get(start + 6)?, "modeloveiculo.automatico")?,
        },
    ))
}
