//! Vehicle repository over the `veiculo` table.
//!
//! # Invariants
//! - `modelo_id` is checked against `modeloveiculo` inside the write
//!   transaction.
//! - No uniqueness on `placa`.

use crate::model::vehicle::Vehicle;
use crate::model::vehicle_model::VehicleModel;
use crate::model::{EntityKind, Record, RecordId};
use crate::repo::vehicle_model_repo::read_vehicle_model;
use crate::repo::{
    bool_to_int, delete_row, ensure_connection_ready, ensure_exists, ensure_parent_exists,
    log_write, parse_bool, CrudRepository, RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const KIND: EntityKind = EntityKind::Vehicle;

const VEHICLE_COLUMNS: &[&str] = &[
    "id",
    "modelo_id",
    "cor",
    "ano_fabricacao",
    "ano_modelo",
    "valor",
    "placa",
    "vendido",
];

const VEHICLE_SELECT_SQL: &str = "SELECT
    id,
    modelo_id,
    cor,
    ano_fabricacao,
    ano_modelo,
    valor,
    placa,
    vendido
FROM veiculo";

const VEHICLE_COLUMN_COUNT: usize = 8;

/// Vehicle list row with its vehicle model.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleListing {
    pub vehicle: Record<Vehicle>,
    /// `None` when the referenced model no longer exists.
    pub model: Option<Record<VehicleModel>>,
}

/// SQLite-backed vehicle repository.
pub struct SqliteVehicleRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteVehicleRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, KIND.table(), VEHICLE_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl CrudRepository for SqliteVehicleRepository<'_> {
    type Fields = Vehicle;
    type Listing = VehicleListing;

    fn list_all(&self) -> RepoResult<Vec<VehicleListing>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                v.id,
                v.modelo_id,
                v.cor,
                v.ano_fabricacao,
                v.ano_modelo,
                v.valor,
                v.placa,
                v.vendido,
                m.id,
                m.nome,
                m.montadora_id,
                m.valor_referencia,
                m.motorizacao,
                m.turbo,
                m.automatico
             FROM veiculo v
             LEFT JOIN modeloveiculo m ON m.id = v.modelo_id
             ORDER BY v.id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut listings = Vec::new();
        while let Some(row) = rows.next()? {
            let vehicle = read_vehicle(row)?;
            let parent_id: Option<RecordId> = row.get(VEHICLE_COLUMN_COUNT)?;
            let model = match parent_id {
                Some(_) => Some(read_vehicle_model(row, VEHICLE_COLUMN_COUNT)?),
                None => None,
            };
            listings.push(VehicleListing { vehicle, model });
        }
        Ok(listings)
    }

    fn list_records(&self) -> RepoResult<Vec<Record<Vehicle>>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{VEHICLE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut vehicles = Vec::new();
        while let Some(row) = rows.next()? {
            vehicles.push(read_vehicle(row)?);
        }
        Ok(vehicles)
    }

    fn get_by_id(&self, id: RecordId) -> RepoResult<Record<Vehicle>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{VEHICLE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return read_vehicle(row);
        }
        Err(RepoError::NotFound { entity: KIND, id })
    }

    fn create(&self, fields: &Vehicle) -> RepoResult<Record<Vehicle>> {
        let result = insert_vehicle(self.conn, fields);
        log_write(KIND, "create", result.as_ref().ok().copied(), &result);
        Ok(Record::new(result?, fields.clone()))
    }

    fn update(&self, id: RecordId, fields: &Vehicle) -> RepoResult<Record<Vehicle>> {
        let result = update_vehicle(self.conn, id, fields);
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

fn insert_vehicle(conn: &Connection, fields: &Vehicle) -> RepoResult<RecordId> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    ensure_parent_exists(&tx, EntityKind::VehicleModel, fields.model_id)?;
    tx.execute(
        "INSERT INTO veiculo (
            modelo_id,
            cor,
            ano_fabricacao,
            ano_modelo,
            valor,
            placa,
            vendido
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
        params![
            fields.model_id,
            fields.color.as_str(),
            fields.manufacture_year,
            fields.model_year,
            fields.price,
            fields.license_plate.as_str(),
            bool_to_int(fields.sold),
        ],
    )?;
    let id = tx.last_insert_rowid();
    tx.commit()?;
    Ok(id)
}

fn update_vehicle(conn: &Connection, id: RecordId, fields: &Vehicle) -> RepoResult<()> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    ensure_exists(&tx, KIND, id)?;
    ensure_parent_exists(&tx, EntityKind::VehicleModel, fields.model_id)?;
    tx.execute(
        "UPDATE veiculo
         SET
            modelo_id = ?1,
            cor = ?2,
            ano_fabricacao = ?3,
            ano_modelo = ?4,
            valor = ?5,
            placa = ?6,
            vendido = ?7
         WHERE id = ?8;",
        params![
            fields.model_id,
            fields.color.as_str(),
            fields.manufacture_year,
            fields.model_year,
            fields.price,
            fields.license_plate.as_str(),
            bool_to_int(fields.sold),
            id,
        ],
    )?;
    tx.commit()?;
    Ok(())
}

fn read_vehicle(row: &Row<'_>) -> RepoResult<Record<Vehicle>> {
    Ok(Record::new(
        row.get(0)?,
        Vehicle {
            model_id: row.get(1)?,
            color: row.get(2)?,
            manufacture_year: row.get(3)?,
            model_year: row.get(4)?,
            price: row.get(5)?,
            license_plate: row.get(6)?,
            sold: parse_bool(row.get(7)?, "veiculo.vendido")?,
        },
    ))
}
